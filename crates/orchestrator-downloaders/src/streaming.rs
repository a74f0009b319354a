//! Streaming protocol branch: no download client is invoked. A `.strm`
//! indirection record is synthesized so the library layer can treat a
//! streaming grab the same as a completed import, without this crate
//! reaching into a streaming provider's embed API (explicitly out of
//! scope).

#[derive(Debug, Clone)]
pub struct StrmRecord {
    pub title: String,
    pub stream_url: String,
    pub virtual_path: String,
}

pub fn synthesize_strm_record(title: &str, stream_url: &str) -> StrmRecord {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' || c == '-' { c } else { '_' })
        .collect();
    StrmRecord {
        title: title.to_string(),
        stream_url: stream_url.to_string(),
        virtual_path: format!("{}.strm", sanitized.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_unsafe_characters_in_virtual_path() {
        let record = synthesize_strm_record("Show: Season 1/Ep 2", "https://stream.example/x");
        assert!(!record.virtual_path.contains(':'));
        assert!(!record.virtual_path.contains('/'));
        assert!(record.virtual_path.ends_with(".strm"));
    }
}
