mod common;

use std::time::Duration;

use common::Harness;
use tourdesk::controller::{DashboardSettings, LoadOutcome};
use tourdesk::core::{DomainId, NavigationError, NotifyLevel, SectionId};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn startup_selects_first_domain_and_renders_dashboard() {
    let h = Harness::started(&[]).await;

    assert_eq!(h.ctl.current_domain(), Some(&DomainId::from("domain1")));
    assert_eq!(h.ctl.current_section(), SectionId::Dashboard);
    assert_eq!(h.ctl.highlighted(), SectionId::Dashboard);
    assert_eq!(h.ctl.renderer().renders.len(), 1);
    assert_eq!(h.ctl.renderer().renders[0].0, SectionId::Dashboard);
    assert!(h.ctl.visuals_ready());
    assert!(!h.ctl.is_loading());
}

#[tokio::test(start_paused = true)]
async fn visuals_wait_for_the_settle_delay() {
    let settings = DashboardSettings {
        visuals_settle: ms(500),
        ..DashboardSettings::default()
    };
    let mut h = Harness::new(&[], settings);
    h.ctl.load_initial_data();
    h.run_for(ms(50)).await;
    h.run_for(ms(100)).await;
    assert!(!h.ctl.visuals_ready());

    h.run_for(ms(500)).await;
    assert!(h.ctl.visuals_ready());
}

#[tokio::test(start_paused = true)]
async fn every_section_can_be_switched_to() {
    let mut h = Harness::started(&[]).await;
    for section in SectionId::ALL {
        h.ctl.switch_section(section);
        assert_eq!(h.ctl.current_section(), section);
        assert_eq!(h.ctl.highlighted(), section);
    }
}

#[tokio::test(start_paused = true)]
async fn reselecting_the_active_section_reloads_it() {
    let mut h = Harness::started(&[]).await;
    h.ctl.switch_section(SectionId::Tours);
    h.run_for(ms(50)).await;
    h.ctl.switch_section(SectionId::Tours);
    h.run_for(ms(50)).await;

    assert_eq!(h.loader.calls_for(SectionId::Tours).len(), 2);
    let tour_renders = h
        .ctl
        .renderer()
        .renders
        .iter()
        .filter(|(section, _)| *section == SectionId::Tours)
        .count();
    assert_eq!(tour_renders, 2);
}

#[tokio::test(start_paused = true)]
async fn invalid_navigation_leaves_state_untouched() {
    let mut h = Harness::started(&[]).await;
    h.ctl.switch_section(SectionId::Reviews);
    let calls_before = h.loader.calls().len();

    let err = h.ctl.navigate("flights").unwrap_err();
    assert_eq!(err, NavigationError::InvalidSection("flights".to_string()));
    assert_eq!(h.ctl.current_section(), SectionId::Reviews);
    assert_eq!(h.loader.calls().len(), calls_before);

    h.ctl.navigate("  Tours ").unwrap();
    assert_eq!(h.ctl.current_section(), SectionId::Tours);
}

#[tokio::test(start_paused = true)]
async fn slow_first_response_never_overwrites_newer_one() {
    let mut h = Harness::started(&[]).await;
    h.loader.delay_next(SectionId::Tours, ms(500));
    h.loader.delay_next(SectionId::Tours, ms(100));

    h.ctl.switch_section(SectionId::Tours);
    h.ctl.reload();
    assert!(h.ctl.is_loading());

    h.run_for(ms(1_000)).await;

    let tours: Vec<_> = h
        .outcomes
        .iter()
        .filter(|(section, _)| *section == SectionId::Tours)
        .map(|(_, outcome)| *outcome)
        .collect();
    assert_eq!(tours, vec![LoadOutcome::Rendered, LoadOutcome::Stale]);
    // loader call #1 was the startup dashboard load
    assert_eq!(h.ctl.renderer().last_ids(), vec!["tours@domain1#3".to_string()]);
    assert!(!h.ctl.is_loading());
}

#[tokio::test(start_paused = true)]
async fn leaving_a_section_discards_its_late_response() {
    let mut h = Harness::started(&[]).await;
    h.loader.delay_next(SectionId::Tours, ms(300));
    h.ctl.switch_section(SectionId::Tours);
    h.ctl.switch_section(SectionId::Cities);

    h.run_for(ms(500)).await;

    let (section, records) = h.ctl.renderer().renders.last().unwrap();
    assert_eq!(*section, SectionId::Cities);
    assert!(records[0].id.starts_with("cities@domain1"));
    assert!(h
        .outcomes
        .contains(&(SectionId::Tours, LoadOutcome::Stale)));
}

#[tokio::test(start_paused = true)]
async fn domain_switch_before_domains_load_is_ignored() {
    let mut h = Harness::new(&[], DashboardSettings::default());

    let err = h.ctl.switch_domain(DomainId::from("domain2")).unwrap_err();
    assert_eq!(err, NavigationError::UnknownDomain("domain2".to_string()));
    assert!(h.loader.calls().is_empty());
    assert_eq!(h.notes.at(NotifyLevel::Warning).len(), 1);

    h.ctl.load_initial_data();
    h.run_for(ms(50)).await;
    h.ctl.switch_section(SectionId::Bookings);
    h.run_for(ms(200)).await;

    assert_eq!(h.loader.calls_for(SectionId::Bookings), vec![DomainId::from("domain1")]);
}

#[tokio::test(start_paused = true)]
async fn domain_switch_reloads_current_section_for_new_domain() {
    let mut h = Harness::started(&[]).await;
    h.loader.delay_next(SectionId::Tours, ms(20));
    h.ctl.switch_section(SectionId::Tours);
    h.run_for(ms(50)).await;

    h.loader.delay_next(SectionId::Tours, ms(400));
    h.loader.delay_next(SectionId::Tours, ms(100));
    h.ctl.reload();
    h.ctl.switch_domain(DomainId::from("domain2")).unwrap();
    h.run_for(ms(600)).await;

    assert_eq!(h.ctl.current_domain(), Some(&DomainId::from("domain2")));
    let last = h.ctl.renderer().last_ids();
    assert!(last[0].starts_with("tours@domain2"), "{last:?}");
}

#[tokio::test(start_paused = true)]
async fn cycle_domain_wraps_through_loaded_list() {
    let mut h = Harness::started(&[]).await;
    h.ctl.cycle_domain();
    assert_eq!(h.ctl.current_domain(), Some(&DomainId::from("domain2")));
    h.ctl.cycle_domain();
    assert_eq!(h.ctl.current_domain(), Some(&DomainId::from("domain1")));
}

#[tokio::test(start_paused = true)]
async fn missing_loader_is_reported_not_fatal() {
    let mut h = Harness::started(&[SectionId::Mail]).await;
    let renders = h.ctl.renderer().renders.len();

    h.ctl.switch_section(SectionId::Mail);

    assert_eq!(h.ctl.current_section(), SectionId::Mail);
    assert!(!h.ctl.is_loading());
    assert_eq!(h.notes.at(NotifyLevel::Info), vec!["Mail is not available yet"]);
    h.run_for(ms(100)).await;
    assert_eq!(h.ctl.renderer().renders.len(), renders);
}

#[tokio::test(start_paused = true)]
async fn timeout_reports_once_and_keeps_previous_records() {
    let settings = DashboardSettings {
        load_timeout: ms(1_000),
        ..DashboardSettings::default()
    };
    let mut h = Harness::new(&[], settings);
    h.ctl.load_initial_data();
    h.run_for(ms(50)).await;
    h.run_for(ms(200)).await;
    h.ctl.switch_section(SectionId::Tours);
    h.run_for(ms(50)).await;
    let good = h.ctl.renderer().last_ids();

    h.loader.delay_next(SectionId::Tours, ms(10_000));
    h.ctl.reload();
    h.run_for(ms(2_000)).await;

    let errors = h.notes.at(NotifyLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("timed out"), "{errors:?}");
    assert_eq!(h.ctl.renderer().last_ids(), good);
    assert_eq!(h.outcomes.last(), Some(&(SectionId::Tours, LoadOutcome::Failed)));
}

#[tokio::test(start_paused = true)]
async fn loader_failure_and_panic_become_error_notifications() {
    let mut h = Harness::started(&[]).await;

    h.loader.fail_with(SectionId::Coupons, "boom");
    h.ctl.switch_section(SectionId::Coupons);
    h.run_for(ms(50)).await;

    h.loader.panic_on(SectionId::Reviews);
    h.ctl.switch_section(SectionId::Reviews);
    h.run_for(ms(50)).await;

    let errors = h.notes.at(NotifyLevel::Error);
    assert_eq!(
        errors,
        vec![
            "Failed to load Coupons: boom".to_string(),
            "Failed to load Reviews: reviews loader panicked".to_string(),
        ]
    );
    assert_eq!(h.ctl.current_section(), SectionId::Reviews);
}
