use std::time::Duration;

use vitrine::prelude::*;

const DELAY: Duration = Duration::from_millis(700);

fn contact_page() -> Page {
    Page::new(SiteConfig::default()).with_form(FormInput::with_fields(Field::all()))
}

fn fill(page: &mut Page, clock: &mut ManualScheduler, values: &[(Field, &str)]) {
    for (field, value) in values {
        page.dispatch(
            Event::Edit {
                field: *field,
                value: value.to_string(),
            },
            clock,
        );
    }
}

fn run_due(page: &mut Page, clock: &mut ManualScheduler, by: Duration) -> Vec<Effect> {
    let mut out = Vec::new();
    for task in clock.advance(by) {
        out.extend(page.dispatch(Event::TimerFired(task), clock));
    }
    out
}

fn status(effects: &[Effect]) -> Option<&str> {
    effects.iter().rev().find_map(|e| match e {
        Effect::SetStatus(s) => Some(s.as_str()),
        _ => None,
    })
}

const GOOD: &[(Field, &str)] = &[
    (Field::Name, "Jo"),
    (Field::Email, "a@b.com"),
    (Field::Topic, "support"),
    (Field::Message, "Hello there!"),
];

#[test]
fn valid_submission_runs_to_success() {
    let msgs = Locale::Es.messages();
    let mut clock = ManualScheduler::new();
    let mut page = contact_page();
    fill(&mut page, &mut clock, GOOD);

    let fx = page.dispatch(Event::Submit, &mut clock);
    assert_eq!(status(&fx), Some(msgs.pending));
    assert!(fx.contains(&Effect::SetSubmitDisabled(true)));
    assert!(!fx
        .iter()
        .any(|e| matches!(e, Effect::SetFieldMessage { text, .. } if !text.is_empty())));
    assert_eq!(
        page.submit_state(),
        Some(SubmitState::Submitting { ticket: 0 })
    );

    assert!(run_due(&mut page, &mut clock, Duration::from_millis(100)).is_empty());

    let fx = run_due(&mut page, &mut clock, DELAY);
    assert_eq!(status(&fx), Some(msgs.success));
    assert!(fx.contains(&Effect::SetSubmitDisabled(false)));
    assert!(fx.contains(&Effect::ResetForm));
    assert_eq!(page.submit_state(), Some(SubmitState::Idle));
}

#[test]
fn invalid_submission_marks_every_failing_field() {
    let msgs = Locale::Es.messages();
    let mut clock = ManualScheduler::new();
    let mut page = contact_page();
    fill(
        &mut page,
        &mut clock,
        &[
            (Field::Name, "J"),
            (Field::Email, "bad"),
            (Field::Topic, ""),
            (Field::Message, "short"),
        ],
    );

    let fx = page.dispatch(Event::Submit, &mut clock);
    assert_eq!(status(&fx), Some(msgs.rejected));
    for field in Field::all() {
        let expected = Effect::SetFieldMessage {
            field: *field,
            text: msgs.field_error(*field).to_string(),
        };
        assert!(fx.contains(&expected), "missing message for {field:?}");
    }
    assert_eq!(page.submit_state(), Some(SubmitState::Idle));
    assert_eq!(clock.pending_len(), 0);
}

#[test]
fn resubmitting_after_success_needs_fresh_input() {
    let msgs = Locale::Es.messages();
    let mut clock = ManualScheduler::new();
    let mut page = contact_page();
    fill(&mut page, &mut clock, GOOD);

    page.dispatch(Event::Submit, &mut clock);
    run_due(&mut page, &mut clock, DELAY);

    let fx = page.dispatch(Event::Submit, &mut clock);
    assert_eq!(status(&fx), Some(msgs.rejected));

    fill(&mut page, &mut clock, GOOD);
    let fx = page.dispatch(Event::Submit, &mut clock);
    assert_eq!(status(&fx), Some(msgs.pending));
    assert_eq!(
        page.submit_state(),
        Some(SubmitState::Submitting { ticket: 1 })
    );
}

#[test]
fn stale_errors_are_cleared_on_blur() {
    let mut clock = ManualScheduler::new();
    let mut page = contact_page();

    let fx = page.dispatch(Event::Blur(Field::Name), &mut clock);
    assert!(fx
        .iter()
        .any(|e| matches!(e, Effect::SetFieldMessage { field: Field::Name, text } if !text.is_empty())));

    fill(&mut page, &mut clock, &[(Field::Name, "Jo")]);
    let fx = page.dispatch(Event::Blur(Field::Name), &mut clock);
    let last_name_msg = fx.iter().rev().find_map(|e| match e {
        Effect::SetFieldMessage {
            field: Field::Name,
            text,
        } => Some(text.as_str()),
        _ => None,
    });
    assert_eq!(last_name_msg, Some(""));
    // Blur never touches the status line.
    assert_eq!(status(&fx), None);
}

#[test]
fn email_only_page_validates_email_alone() {
    let mut clock = ManualScheduler::new();
    let mut page =
        Page::new(SiteConfig::default()).with_form(FormInput::with_fields(&[Field::Email]));
    fill(&mut page, &mut clock, &[(Field::Email, "x@y.co")]);

    let fx = page.dispatch(Event::Submit, &mut clock);
    assert!(fx.contains(&Effect::SetSubmitDisabled(true)));
}

#[test]
fn english_locale_flows_through_dispatch() {
    let mut cfg = SiteConfig::default();
    cfg.locale = Locale::En;
    cfg.submit_delay_ms = 10;
    let mut clock = ManualScheduler::new();
    let mut page = Page::new(cfg).with_form(FormInput::with_fields(Field::all()));
    fill(&mut page, &mut clock, GOOD);

    let fx = page.dispatch(Event::Submit, &mut clock);
    assert_eq!(status(&fx), Some("Sending…"));
    let fx = run_due(&mut page, &mut clock, Duration::from_millis(10));
    assert_eq!(status(&fx), Some(Locale::En.messages().success));
}
