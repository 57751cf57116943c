use heartrisk_core::inputs::PatientInputs;
use heartrisk_core::risk::AssessmentResult;
use heartrisk_export::render::PageRenderer;
use heartrisk_export::view::{PageView, MODEL_MISSING_MESSAGE};

fn render(view: &PageView) -> String {
    PageRenderer::new().unwrap().render(view).unwrap()
}

#[test]
fn initial_page_has_form_and_summary_but_no_result() {
    let html = render(&PageView::new(&PatientInputs::default(), None));

    assert!(html.contains("Heart Disease Risk Calculator"));
    assert!(html.contains("Patient Data Summary"));
    assert!(html.contains(r#"name="trestbps""#));
    assert!(html.contains("Non-anginal Pain (2)"));
    assert!(html.contains("Assess Risk"));
    assert!(!html.contains(r#"id="result""#));
    assert!(!html.contains("disabled"));
}

#[test]
fn high_risk_result_renders_alert_badge() {
    let view = PageView::new(&PatientInputs::default(), None)
        .with_result(&AssessmentResult::new(0.45), jiff::Timestamp::UNIX_EPOCH);
    let html = render(&view);

    assert!(html.contains(r#"id="result""#));
    assert!(html.contains("45.0%"));
    assert!(html.contains(r#"class="banner alert""#));
    assert!(html.contains("HIGH RISK"));
    assert!(html.contains("Refer to Cardiology"));
    assert!(html.contains(r#"<progress max="100" value="45">"#));
    assert!(html.contains("high-sensitivity threshold of 30.0%"));
}

#[test]
fn low_risk_result_renders_success_badge() {
    let view = PageView::new(&PatientInputs::default(), None)
        .with_result(&AssessmentResult::new(0.1), jiff::Timestamp::UNIX_EPOCH);
    let html = render(&view);

    assert!(html.contains(r#"class="banner success""#));
    assert!(html.contains("LOW RISK"));
    assert!(html.contains("Standard Follow-up"));
}

#[test]
fn missing_model_renders_message_and_inert_button() {
    let view = PageView::new(
        &PatientInputs::default(),
        Some(MODEL_MISSING_MESSAGE.to_string()),
    );
    let html = render(&view);

    assert!(html.contains("Model file not found!"));
    assert!(html.contains("disabled"));
    assert!(!html.contains(r#"id="result""#));
}

#[test]
fn control_changes_rerender_and_button_assesses() {
    let html = render(&PageView::new(&PatientInputs::default(), None));

    assert!(html.contains(r#"<form method="get" action="/" id="vitals">"#));
    // Six sliders, five selects and two radio pairs.
    assert_eq!(html.matches(r#"onchange="this.form.requestSubmit()""#).count(), 15);
    assert!(html.contains(r#"formmethod="post" formaction="/assess""#));
}

#[test]
fn intro_does_not_name_an_estimator() {
    let html = render(&PageView::new(&PatientInputs::default(), None));
    assert!(html.contains("pre-trained machine learning model"));
    assert!(!html.contains("Random Forest"));
}

#[test]
fn oldpeak_slider_moves_in_hundredths() {
    let inputs = PatientInputs {
        oldpeak: 1.55,
        ..PatientInputs::default()
    };
    let html = render(&PageView::new(&inputs, None));
    assert!(html.contains(r#"step="0.01" value="1.55""#));
    assert!(html.contains("<td>1.55</td>"));
}
