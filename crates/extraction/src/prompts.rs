//! Fixed instructions sent to the model.

use folio_core::language::LanguageTag;

/// Instruction accompanying every region image.
pub const TRANSCRIPTION_INSTRUCTION: &str = "Please transcribe the text in this image, even if \
it's not in English or if it's an old language or script. Return only the text, no additional \
formatting or explanation:";

/// Instruction asking for a bare translation of `text` into `target`.
pub fn translation_instruction(text: &str, target: &LanguageTag) -> String {
    format!(
        "Please translate the following text to {}: ```{text}```. Return only the translated \
         text, no additional formatting or explanation:",
        target.english_name()
    )
}
