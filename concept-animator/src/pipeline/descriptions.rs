//! Per-stage visual descriptions.

use crate::core::{EducationLevel, FormData};

/// Describes what stage `stage_index` (0-based) produced for `form`.
///
/// Pure: the same inputs always give the same text. Indices past the last
/// stage give an empty string.
#[must_use]
pub fn visual_description(stage_index: usize, form: &FormData) -> String {
    match stage_index {
        0 => {
            let title = form.title.to_lowercase();
            let treatment = if title.contains("program") {
                "a computational concept with code examples"
            } else if title.contains("biology") {
                "a biological process with cellular diagrams"
            } else {
                "an educational concept with visual metaphors"
            };
            format!("\"{}\" will be presented as {treatment}.", form.title)
        }
        1 => {
            let tail = match form.education_level {
                EducationLevel::Elementary => "→ Simple Quiz",
                EducationLevel::College => "→ Advanced Implications → Research Directions",
                _ => "→ Practice Activities",
            };
            format!("Introduction → Key Components → Examples → Applications {tail}")
        }
        2 => {
            let style = match form.education_level {
                EducationLevel::Elementary => "colorful cartoon characters and simple diagrams",
                EducationLevel::College => {
                    "detailed technical diagrams and professional illustrations"
                }
                _ => "mixed media illustrations with intermediate complexity",
            };
            format!("Using {style} to represent the concept.")
        }
        3 => {
            let mut text = format!(
                "Narration script created with {} vocabulary appropriate for {} level. ",
                form.language, form.education_level
            );
            // Case-sensitive on purpose: only the literal default is monolingual.
            if form.language != "english" {
                text.push_str(&format!(
                    "Primary narration in {} with English subtitles available.",
                    form.language
                ));
            }
            text
        }
        4 => "Animation rendered with synchronized audio and visual elements, optimized for both mobile and desktop viewing.".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_zero_treatments() {
        let form = FormData::new("Learn Python Programming");
        assert_eq!(
            visual_description(0, &form),
            "\"Learn Python Programming\" will be presented as a computational concept with code examples."
        );

        let form = FormData::new("Marine Biology");
        assert_eq!(
            visual_description(0, &form),
            "\"Marine Biology\" will be presented as a biological process with cellular diagrams."
        );

        let form = FormData::new("World War II");
        assert_eq!(
            visual_description(0, &form),
            "\"World War II\" will be presented as an educational concept with visual metaphors."
        );
    }

    #[test]
    fn test_program_checked_before_biology() {
        let form = FormData::new("Programming for Biology");
        assert!(visual_description(0, &form).ends_with("with code examples."));
    }

    #[test]
    fn test_structure_by_level() {
        let elementary = FormData::new("Atoms").with_level(EducationLevel::Elementary);
        let college = FormData::new("Atoms").with_level(EducationLevel::College);
        let adult = FormData::new("Atoms").with_level(EducationLevel::Adult);

        assert_eq!(
            visual_description(1, &elementary),
            "Introduction → Key Components → Examples → Applications → Simple Quiz"
        );
        assert_eq!(
            visual_description(1, &college),
            "Introduction → Key Components → Examples → Applications → Advanced Implications → Research Directions"
        );
        assert_eq!(
            visual_description(1, &adult),
            "Introduction → Key Components → Examples → Applications → Practice Activities"
        );
    }

    #[test]
    fn test_storyboard_style_by_level() {
        let middle = FormData::new("Atoms");
        assert_eq!(
            visual_description(2, &middle),
            "Using mixed media illustrations with intermediate complexity to represent the concept."
        );
        let college = FormData::new("Atoms").with_level(EducationLevel::College);
        assert_eq!(
            visual_description(2, &college),
            "Using detailed technical diagrams and professional illustrations to represent the concept."
        );
    }

    #[test]
    fn test_script_bilingual_clause() {
        let spanish = FormData::new("Atoms")
            .with_level(EducationLevel::High)
            .with_language("spanish");
        assert_eq!(
            visual_description(3, &spanish),
            "Narration script created with spanish vocabulary appropriate for high level. \
             Primary narration in spanish with English subtitles available."
        );

        let english = FormData::new("Atoms").with_level(EducationLevel::High);
        assert_eq!(
            visual_description(3, &english),
            "Narration script created with english vocabulary appropriate for high level. "
        );

        let capitalized = FormData::new("Atoms").with_language("English");
        assert!(visual_description(3, &capitalized).contains("Primary narration in English"));
    }

    #[test]
    fn test_rendering_and_out_of_range() {
        let form = FormData::new("Atoms");
        assert!(visual_description(4, &form).starts_with("Animation rendered"));
        assert_eq!(visual_description(5, &form), "");
        assert_eq!(visual_description(usize::MAX, &form), "");
    }

    #[test]
    fn test_pure() {
        let form = FormData::new("Cell Biology")
            .with_description("organelles")
            .with_level(EducationLevel::College)
            .with_language("french");
        for index in 0..6 {
            assert_eq!(visual_description(index, &form), visual_description(index, &form));
        }
    }
}
