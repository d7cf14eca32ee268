/// Texts and image paths shown by the letter, generated from `letter.toml`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterCopy {
    pub envelope_image: &'static str,
    pub envelope_hint: &'static str,
    pub idle_title: &'static str,
    pub idle_image: &'static str,
    pub accepted_title: &'static str,
    pub accepted_image: &'static str,
    pub declined_title: &'static str,
    pub yes_image: &'static str,
    pub no_image: &'static str,
    pub final_text: &'static str,
    pub declined_text: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/letter_copy.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_copy_is_complete() {
        let fields = [
            LETTER_COPY.envelope_image,
            LETTER_COPY.envelope_hint,
            LETTER_COPY.idle_title,
            LETTER_COPY.idle_image,
            LETTER_COPY.accepted_title,
            LETTER_COPY.accepted_image,
            LETTER_COPY.declined_title,
            LETTER_COPY.yes_image,
            LETTER_COPY.no_image,
            LETTER_COPY.final_text,
            LETTER_COPY.declined_text,
        ];
        for field in fields {
            assert!(!field.trim().is_empty());
        }
    }
}
