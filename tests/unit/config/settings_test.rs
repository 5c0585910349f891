// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 通过公开API验证内置默认配置的形状

#[cfg(test)]
mod tests {
    use qualrs::config::settings::Settings;
    use std::time::Duration;

    #[test]
    fn test_built_in_defaults() {
        let settings = Settings::new().expect("defaults must load without any config file");

        assert_eq!(settings.crawler.worker_count, 10);
        assert_eq!(settings.crawler.homepage_timeout(), Duration::from_secs(15));
        assert_eq!(settings.crawler.subpage_timeout(), Duration::from_secs(10));
        assert_eq!(settings.crawler.inter_page_delay_ms, 500);
        assert!(settings.crawler.render_enabled);
        assert_eq!(settings.crawler.render_settle_ms, 1500);
        assert_eq!(settings.crawler.max_reveal_clicks, 1);

        // Candidate paths keep their priority order; the homepage itself is implicit
        assert_eq!(
            settings.crawler.candidate_paths,
            vec![
                "/contact",
                "/get-quote",
                "/quote",
                "/get-started",
                "/signup",
                "/sign-up"
            ]
        );

        assert!(settings.detection.keywords.contains(&"phone".to_string()));
        assert!(settings.detection.keywords.contains(&"whatsapp".to_string()));
        assert_eq!(settings.detection.early_stop_threshold, 2);
        assert!(settings.detection.native_tel_stops);
    }
}
