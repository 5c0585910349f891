// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面检查器测试模块
///
/// 通过公开API验证证据去重在重复检查下的稳定性

#[cfg(test)]
mod tests {
    use qualrs::detection::extractor::PhoneFieldExtractor;
    use qualrs::domain::models::evidence::EvidenceKind;

    fn extractor() -> PhoneFieldExtractor {
        PhoneFieldExtractor::new(vec![
            "phone".to_string(),
            "mobile".to_string(),
            "tel".to_string(),
            "callback".to_string(),
        ])
    }

    const MIXED_HTML: &str = r#"<html><body>
    <script src="https://js.hsforms.net/forms/v2.js"></script>
    <form>
      <input type="tel" name="phone" id="direct">
      <input type="text" name="mobile_backup" id="backup">
    </form>
    </body></html>"#;

    #[test]
    fn test_inspecting_same_page_twice_adds_nothing() {
        let extractor = extractor();
        let first = extractor.inspect(MIXED_HTML, &[], false);
        assert!(!first.evidence.is_empty());

        let second = extractor.inspect(MIXED_HTML, &first.evidence, false);
        assert!(
            second.evidence.is_empty(),
            "a revisited page must not inflate the evidence list: {:?}",
            second.evidence
        );
    }

    #[test]
    fn test_distinct_strategies_contribute_distinct_evidence() {
        let inspection = extractor().inspect(MIXED_HTML, &[], false);
        let kinds: Vec<EvidenceKind> = inspection.evidence.iter().map(|e| e.kind).collect();

        assert!(kinds.contains(&EvidenceKind::NativeTelInput));
        assert!(kinds.contains(&EvidenceKind::KeywordMatch));
        assert!(kinds.contains(&EvidenceKind::ProviderSignature));
        assert_eq!(inspection.evidence.len(), 3);
    }

    #[test]
    fn test_prior_evidence_suppresses_same_field_on_later_page() {
        let extractor = extractor();
        let homepage = r#"<input type="text" name="phone" id="p">"#;
        let contact = r#"<form><input type="text" name="phone" id="p"></form>"#;

        let first = extractor.inspect(homepage, &[], false);
        assert_eq!(first.evidence.len(), 1);

        let second = extractor.inspect(contact, &first.evidence, false);
        assert!(second.evidence.is_empty());
    }
}
