use super::params::parse_params;

/// Whether a fragment was written by [`QueryCodec::serialize`] or is a short
/// hand-written/bookmarked one such as `q=Education&vol_loc=90815`.
///
/// [`QueryCodec::serialize`]: super::QueryCodec::serialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Canonical,
    Legacy,
}

impl FragmentKind {
    pub fn classify(fragment: &str) -> Self {
        let canonical = parse_params(fragment)
            .iter()
            .any(|(name, _)| name == "num" || name.starts_with("timeperiod"));
        if canonical {
            Self::Canonical
        } else {
            Self::Legacy
        }
    }

    pub fn is_legacy(self) -> bool {
        self == Self::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::FragmentKind;
    use crate::query::{Query, QueryCodec};

    #[test]
    fn serialized_queries_are_canonical() {
        let codec = QueryCodec::default();
        let encoded = codec.serialize(&Query::new("x", ""));
        assert_eq!(FragmentKind::classify(&encoded), FragmentKind::Canonical);
    }

    #[test]
    fn bookmarked_fragments_are_legacy() {
        assert!(FragmentKind::classify("q=Education&vol_loc=90815").is_legacy());
        assert!(FragmentKind::classify("#category=hunger").is_legacy());
        assert!(FragmentKind::classify("").is_legacy());
        assert!(!FragmentKind::classify("q=x&timeperiod=today").is_legacy());
    }

    #[test]
    fn substring_lookalikes_do_not_count() {
        assert!(FragmentKind::classify("q=num%3D&renum=3").is_legacy());
    }
}
