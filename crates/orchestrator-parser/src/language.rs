use once_cell::sync::Lazy;
use orchestrator_core::model::LangCode;
use regex::Regex;

static LANG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(multi|dual\s?audio|vff|german|french|spanish|italian|japanese|korean|chinese|russian|english)\b").unwrap()
});

/// Returns every canonical language tag found; defaults to `{En}` when
/// the title carries no explicit marker, per the parser's "never fails"
/// contract.
pub fn extract_languages(title: &str) -> Vec<LangCode> {
    let mut found = Vec::new();
    for m in LANG_REGEX.find_iter(title) {
        let code = match m.as_str().to_lowercase().replace(' ', "").as_str() {
            "multi" => LangCode::Multi,
            "dualaudio" => LangCode::Multi,
            "vff" | "french" => LangCode::Fr,
            "german" => LangCode::De,
            "spanish" => LangCode::Es,
            "italian" => LangCode::It,
            "japanese" => LangCode::Ja,
            "korean" => LangCode::Ko,
            "chinese" => LangCode::Zh,
            "russian" => LangCode::Ru,
            "english" => LangCode::En,
            _ => continue,
        };
        if !found.contains(&code) {
            found.push(code);
        }
    }
    if found.is_empty() {
        found.push(LangCode::En);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_english() {
        assert_eq!(extract_languages("Movie 1080p BluRay"), vec![LangCode::En]);
    }

    #[test]
    fn recognizes_multi() {
        assert_eq!(extract_languages("Movie MULTi 1080p BluRay"), vec![LangCode::Multi]);
    }

    #[test]
    fn recognizes_german() {
        assert_eq!(extract_languages("Movie German 1080p BluRay"), vec![LangCode::De]);
    }
}
