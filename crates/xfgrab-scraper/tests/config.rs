use std::path::PathBuf;

use xfgrab_scraper::{ByteSize, ScrapeConfig};

#[test]
fn yaml_config_parses_sizes_as_shorthand() {
    let conf: ScrapeConfig = serde_yaml::from_str(
        r#"
        cookie: "xf_session=abc123"
        output: "/tmp/downloads"
        maxSize: "500MB"
        minSize: "100KiB"
        ignored: ["thumb", ".gif"]
        external: true
        skipScraped: true
        "#,
    )
    .unwrap();

    assert_eq!(conf.cookie.as_deref(), Some("xf_session=abc123"));
    assert_eq!(conf.output, Some(PathBuf::from("/tmp/downloads")));
    assert_eq!(conf.max_size, Some(ByteSize(500_000_000)));
    assert_eq!(conf.min_size, Some(ByteSize(102_400)));
    assert_eq!(conf.ignored, ["thumb", ".gif"]);
    assert!(conf.external);
    assert!(conf.skip_scraped);
    // Everything else keeps its default.
    assert!(!conf.no_directories);
    assert!(!conf.render_pdf);
    assert!(conf.throttle.is_none());
}

#[test]
fn empty_config_is_all_defaults() {
    let conf: ScrapeConfig = serde_yaml::from_str("{}").unwrap();
    assert!(conf.user_agent.starts_with("Mozilla/5.0"));
    assert!(conf.cookie.is_none());
    assert!(conf.max_size.is_none());
    assert!(conf.min_size.is_none());
    assert!(conf.ignored.is_empty());
}

#[test]
fn unparsable_size_shorthand_is_rejected() {
    let err = serde_yaml::from_str::<ScrapeConfig>(r#"maxSize: "ad2wd2""#);
    assert!(err.is_err());
}
