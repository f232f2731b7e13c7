use sightcheck::domain::{ImageDetail, PlatformCapabilities, Verdict, VerdictOutcome};

#[test]
fn given_ollama_preset_then_vision_is_supported_without_api_key() {
    let capabilities = PlatformCapabilities::ollama();

    assert!(capabilities.supports_vision);
    assert!(!capabilities.api_key_required);
    assert_eq!(capabilities.endpoint, "http://localhost:11434/v1");
}

#[test]
fn given_perplexity_preset_then_api_key_is_required() {
    let capabilities = PlatformCapabilities::perplexity();

    assert!(capabilities.api_key_required);
    assert_eq!(capabilities.model, "sonar-pro");
}

#[test]
fn given_builder_overrides_then_they_replace_preset_values() {
    let capabilities = PlatformCapabilities::docker_model()
        .with_model("llava:13b")
        .with_endpoint("http://models.internal/v1")
        .with_image_detail(ImageDetail::Low);

    assert_eq!(capabilities.model, "llava:13b");
    assert_eq!(capabilities.endpoint, "http://models.internal/v1");
    assert_eq!(capabilities.image_detail, ImageDetail::Low);
}

#[test]
fn given_default_image_detail_then_it_is_high_and_serializes_lowercase() {
    assert_eq!(ImageDetail::default(), ImageDetail::High);
    assert_eq!(
        serde_json::to_value(ImageDetail::default()).expect("serialize"),
        serde_json::json!("high")
    );
    assert_eq!(
        serde_json::to_value(ImageDetail::Auto).expect("serialize"),
        serde_json::json!("auto")
    );
}

#[test]
fn given_verdict_outcome_then_passed_reflects_it() {
    let pass = Verdict {
        outcome: VerdictOutcome::Pass,
        explanation: "ok".to_string(),
    };
    let fail = Verdict {
        outcome: VerdictOutcome::Fail,
        explanation: "mismatch".to_string(),
    };

    assert!(pass.passed());
    assert!(!fail.passed());
}
