use whatlang::{Lang, Script, detect};

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Language tag for a generated article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLanguage {
    pub code: String,
    pub rtl: bool,
}

impl DetectedLanguage {
    pub fn dir(&self) -> &'static str {
        if self.rtl { "rtl" } else { "ltr" }
    }
}

pub fn detect_language(text: &str) -> Option<DetectedLanguage> {
    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return None;
    }

    let info = detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    Some(DetectedLanguage {
        code: lang_to_code(info.lang()),
        rtl: matches!(info.script(), Script::Arabic | Script::Hebrew),
    })
}

// ISO 639-1 where one exists; anything unmapped keeps whatlang's ISO 639-3,
// which is still a valid `lang` value.
fn lang_to_code(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Ara => "ar",
        Lang::Urd => "ur",
        Lang::Hin => "hi",
        Lang::Pes => "fa",
        Lang::Heb => "he",
        Lang::Rus => "ru",
        Lang::Ukr => "uk",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Tur => "tr",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Tha => "th",
        Lang::Vie => "vi",
        Lang::Ind => "id",
        Lang::Ben => "bn",
        Lang::Tam => "ta",
        Lang::Mal => "ml",
        Lang::Tgl => "tl",
        _ => return lang.code().to_string(),
    };
    code.to_string()
}
