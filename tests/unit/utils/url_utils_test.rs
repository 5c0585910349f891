// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// URL规范化测试模块
///
/// 覆盖真实数据里常见的脏输入形态

#[cfg(test)]
mod tests {
    use qualrs::utils::errors::CrawlErrorKind;
    use qualrs::utils::url_utils::{candidate_url, normalize_website};

    #[test]
    fn test_messy_real_world_inputs() {
        let cases = [
            ("acme.com", "https://acme.com"),
            ("WWW.ACME.COM", "https://acme.com"),
            ("http://acme.com/", "https://acme.com"),
            ("https://www.acme.com", "https://acme.com"),
            ("  acme.com  ", "https://acme.com"),
            ("HTTP://WWW.Acme.Co.UK/", "https://acme.co.uk"),
            ("www-prefix-but-not-www.example.com", "https://www-prefix-but-not-www.example.com"),
            ("acme.com/quote?src=AD", "https://acme.com/quote?src=ad"),
            ("127.0.0.1:8080", "https://127.0.0.1:8080"),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_website(raw).unwrap(), expected, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "acme.com",
            "WWW.ACME.COM/",
            "http://www.acme.io/landing/",
            "  HTTPS://Sub.Domain.Example.org  ",
            "127.0.0.1:8080",
        ];
        for input in inputs {
            let once = normalize_website(input).unwrap();
            let twice = normalize_website(&once).unwrap();
            assert_eq!(once, twice, "input: {:?}", input);
        }
    }

    #[test]
    fn test_decoration_only_inputs_are_invalid() {
        for raw in ["", "   ", "http://", "https://", "www.", "http://www./"] {
            assert_eq!(
                normalize_website(raw),
                Err(CrawlErrorKind::InvalidUrl),
                "input: {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_garbage_hosts_are_invalid() {
        for raw in ["not a website", "acme.com:99999"] {
            assert_eq!(
                normalize_website(raw),
                Err(CrawlErrorKind::InvalidUrl),
                "input: {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_candidate_url_joining() {
        assert_eq!(
            candidate_url("https://acme.com", "/contact"),
            "https://acme.com/contact"
        );
        assert_eq!(candidate_url("https://acme.com", ""), "https://acme.com");
    }
}
