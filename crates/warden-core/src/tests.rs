//! Unit tests for the pure domain layer: guarded transitions, capacity
//! invariants, derived statuses, and the snapshot filter helpers.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::{
  Error,
  access::{AccessGrant, GrantStatus, PermissionLevel},
  alert::{AlertStatus, SecurityAlert, Severity},
  cell::{Cell, CellStatus},
  identity::Identity,
  person::{Employee, Prisoner, PrisonerStatus, Visitor, VisitorStatus},
  report,
  task::{Task, TaskStatus},
  visit::{Visit, VisitStatus},
};

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn alert(id: &str, severity: Severity) -> SecurityAlert {
  SecurityAlert::new(id, "disturbance in block C", severity, None, now())
    .unwrap()
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[test]
fn empty_required_fields_are_rejected() {
  assert!(matches!(
    SecurityAlert::new("", "msg", Severity::Low, None, now()),
    Err(Error::Validation { field: "id", .. })
  ));
  assert!(matches!(
    SecurityAlert::new("a1", "   ", Severity::Low, None, now()),
    Err(Error::Validation { field: "message", .. })
  ));
  assert!(matches!(
    Identity::new("e1", "", None),
    Err(Error::Validation { field: "name", .. })
  ));
}

#[test]
fn zero_capacity_and_zero_duration_are_rejected() {
  assert!(matches!(
    Cell::new("c1", None, 0),
    Err(Error::Validation { field: "capacity", .. })
  ));
  assert!(matches!(
    Visit::new("v1", "p1", "vis1", now(), 0, now()),
    Err(Error::Validation { field: "duration_minutes", .. })
  ));
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[test]
fn alert_starts_active_and_moves_forward() {
  let mut a = alert("a1", Severity::High);
  assert_eq!(a.status(), AlertStatus::Active);

  a.acknowledge("officer-7", now()).unwrap();
  assert_eq!(a.status(), AlertStatus::Acknowledged);
  assert_eq!(a.acknowledged().unwrap().by, "officer-7");

  a.resolve("officer-7", now() + Duration::minutes(5)).unwrap();
  assert_eq!(a.status(), AlertStatus::Resolved);
  assert_eq!(a.resolved().unwrap().at, now() + Duration::minutes(5));
}

#[test]
fn alert_can_resolve_straight_from_active() {
  let mut a = alert("a1", Severity::Low);
  a.resolve("officer-2", now()).unwrap();
  assert_eq!(a.status(), AlertStatus::Resolved);
  assert!(a.acknowledged().is_none());
}

#[test]
fn resolving_a_resolved_alert_fails_and_changes_nothing() {
  let mut a = alert("a1", Severity::Medium);
  a.resolve("officer-1", now()).unwrap();
  let stamp_before = a.resolved().cloned();

  let err = a.resolve("officer-2", now() + Duration::hours(1)).unwrap_err();
  assert!(matches!(err, Error::InvalidTransition { action: "resolve", .. }));
  assert!(err.is_state_error());
  assert_eq!(a.resolved().cloned(), stamp_before);
  assert_eq!(a.status(), AlertStatus::Resolved);
}

#[test]
fn cannot_acknowledge_out_of_active() {
  let mut a = alert("a1", Severity::Medium);
  a.acknowledge("x", now()).unwrap();
  assert!(a.acknowledge("y", now()).is_err());
}

// ─── Cells ───────────────────────────────────────────────────────────────────

#[test]
fn cell_fills_to_capacity_and_rejects_overflow() {
  let mut cell = Cell::new("c1", Some("C".into()), 2).unwrap();
  assert_eq!(cell.status(), CellStatus::Vacant);

  cell.assign("P1").unwrap();
  assert_eq!(cell.status(), CellStatus::Occupied);
  cell.assign("P2").unwrap();
  assert_eq!(cell.status(), CellStatus::Full);

  let err = cell.assign("P3").unwrap_err();
  assert!(matches!(err, Error::CellFull(_)));
  assert_eq!(cell.occupancy(), 2);
}

#[test]
fn cell_occupancy_invariant_holds_across_mutations() {
  let mut cell = Cell::new("c1", None, 3).unwrap();
  let ops: &[(&str, bool)] = &[
    ("P1", true),
    ("P2", true),
    ("P1", false),
    ("P3", true),
    ("P4", true),
    ("P2", false),
    ("P5", true),
  ];
  for (occupant, is_assign) in ops {
    if *is_assign {
      let _ = cell.assign(occupant);
    } else {
      let _ = cell.remove(occupant);
    }
    assert!(cell.occupancy() <= cell.capacity() as usize);
    let full = cell.occupancy() == cell.capacity() as usize;
    assert_eq!(cell.status() == CellStatus::Full, full);
  }
}

#[test]
fn duplicate_and_missing_occupants_are_rejected() {
  let mut cell = Cell::new("c1", None, 4).unwrap();
  cell.assign("P1").unwrap();
  assert!(matches!(
    cell.assign("P1"),
    Err(Error::AlreadyAssigned { .. })
  ));
  assert!(matches!(cell.remove("P9"), Err(Error::NotAssigned { .. })));
}

#[test]
fn maintenance_blocks_assignment_but_not_removal() {
  let mut cell = Cell::new("c1", None, 2).unwrap();
  cell.assign("P1").unwrap();
  cell.begin_maintenance();
  assert_eq!(cell.status(), CellStatus::Maintenance);

  assert!(matches!(
    cell.assign("P2"),
    Err(Error::CellUnderMaintenance(_))
  ));
  cell.remove("P1").unwrap();

  // Emptying the cell does not clear the flag.
  assert_eq!(cell.status(), CellStatus::Maintenance);
  cell.end_maintenance();
  assert_eq!(cell.status(), CellStatus::Vacant);
}

// ─── Visits ──────────────────────────────────────────────────────────────────

#[test]
fn overdue_visit_stops_being_overdue_once_completed() {
  let scheduled = now() - Duration::hours(1);
  let mut visit = Visit::new("v1", "p1", "vis1", scheduled, 30, now()).unwrap();

  assert!(visit.is_overdue(now()));
  visit.complete(now()).unwrap();
  assert_eq!(visit.status(), VisitStatus::Completed);
  // Scheduled time is still in the past, but the visit is no longer overdue.
  assert!(!visit.is_overdue(now()));
}

#[test]
fn visit_lifecycle_guards() {
  let mut visit =
    Visit::new("v1", "p1", "vis1", now(), 45, now()).unwrap();
  visit.begin(now()).unwrap();
  assert_eq!(visit.status(), VisitStatus::InProgress);
  assert!(visit.begin(now()).is_err());

  visit.complete(now()).unwrap();
  assert!(visit.cancel(now()).is_err());
  assert!(visit.complete(now()).is_err());
}

#[test]
fn visit_ends_at_adds_duration() {
  let visit = Visit::new("v1", "p1", "vis1", now(), 45, now()).unwrap();
  assert_eq!(visit.ends_at(), now() + Duration::minutes(45));
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[test]
fn task_lifecycle_and_overdue() {
  let due = now() - Duration::hours(2);
  let mut task =
    Task::new("t1", "inspect block A", "officer-3", Some(due), now()).unwrap();
  assert_eq!(task.status(), TaskStatus::Pending);
  assert!(task.is_overdue(now()));

  task.start(now()).unwrap();
  assert_eq!(task.status(), TaskStatus::InProgress);
  assert!(task.is_overdue(now()));
  assert!(task.start(now()).is_err());

  task.complete("officer-3", now()).unwrap();
  assert!(!task.is_overdue(now()));
  assert!(task.cancel(now()).is_err());
}

#[test]
fn task_without_due_date_is_never_overdue() {
  let task = Task::new("t1", "count heads", "officer-1", None, now()).unwrap();
  assert!(!task.is_overdue(now() + Duration::days(365)));
}

// ─── Prisoners, employees, visitors ──────────────────────────────────────────

#[test]
fn releasing_a_prisoner_is_terminal_and_clears_the_cell() {
  let identity = Identity::new("P-1023", "John Doe", None).unwrap();
  let mut prisoner = Prisoner::new(identity, now());
  prisoner.move_to_cell("c1").unwrap();
  assert_eq!(prisoner.cell_id(), Some("c1"));

  prisoner.release("warden-1", now()).unwrap();
  assert_eq!(prisoner.status(), PrisonerStatus::Released);
  assert!(prisoner.cell_id().is_none());

  assert!(prisoner.release("warden-1", now()).is_err());
  assert!(prisoner.move_to_cell("c2").is_err());
}

#[test]
fn employee_promote_and_deactivate() {
  let identity = Identity::new("E-17", "Jane Roe", None).unwrap();
  let mut employee =
    Employee::new(identity, "Guard", Some("Security".into()), now()).unwrap();

  employee.promote("Senior Guard").unwrap();
  assert_eq!(employee.title(), "Senior Guard");

  employee.deactivate(now()).unwrap();
  assert!(employee.promote("Captain").is_err());
  assert!(employee.deactivate(now()).is_err());
}

#[test]
fn banned_visitor_cannot_be_banned_again() {
  let identity = Identity::new("V-5", "Sam Smith", None).unwrap();
  let mut visitor = Visitor::new(identity, Some("brother".into()), now());

  visitor.ban("warden-1", Some("contraband".into()), now()).unwrap();
  assert_eq!(visitor.status(), VisitorStatus::Banned);
  assert_eq!(visitor.ban_reason(), Some("contraband"));
  assert!(visitor.ban("warden-1", None, now()).is_err());
}

// ─── Access grants ───────────────────────────────────────────────────────────

fn grant(
  level: PermissionLevel,
  expires_on: Option<NaiveDate>,
) -> AccessGrant {
  AccessGrant::new("g1", "E-17", "Armory", level, "warden-1", expires_on, now())
    .unwrap()
}

fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn revoked_wins_regardless_of_expiry() {
  let mut g = grant(PermissionLevel::Full, Some(today() + Duration::days(30)));
  g.revoke("warden-1", now()).unwrap();
  assert_eq!(g.effective_status(today()), GrantStatus::Revoked);
  assert_eq!(g.effective_level(today()), PermissionLevel::None);
  assert!(!g.can_view(today()));
  assert!(g.revoke("warden-1", now()).is_err());
}

#[test]
fn permanent_grant_never_expires() {
  let g = grant(PermissionLevel::View, None);
  let far_future = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
  assert!(!g.is_expired(far_future));
  assert_eq!(g.effective_status(far_future), GrantStatus::Active);
}

#[test]
fn expired_view_grant_reports_expired_and_denies_view() {
  let yesterday = today() - Duration::days(1);
  let g = grant(PermissionLevel::View, Some(yesterday));
  assert_eq!(g.effective_status(today()), GrantStatus::Expired);
  assert!(!g.can_view(today()));
}

#[test]
fn grant_is_valid_through_its_expiry_day() {
  let g = grant(PermissionLevel::Edit, Some(today()));
  assert!(!g.is_expired(today()));
  assert!(g.can_view(today()));
  assert!(g.can_edit(today()));
  assert!(g.is_expired(today() + Duration::days(1)));
}

#[test]
fn permission_levels_are_ordinal() {
  assert!(PermissionLevel::None < PermissionLevel::View);
  assert!(PermissionLevel::View < PermissionLevel::Edit);
  assert!(PermissionLevel::Edit < PermissionLevel::Full);

  let g = grant(PermissionLevel::View, None);
  assert!(g.can_view(today()));
  assert!(!g.can_edit(today()));
}

// ─── Filters & aggregation ───────────────────────────────────────────────────

#[test]
fn filter_by_status_is_case_insensitive_and_order_preserving() {
  let mut a1 = alert("a1", Severity::Low);
  let a2 = alert("a2", Severity::Low);
  let a3 = alert("a3", Severity::Low);
  a1.resolve("x", now()).unwrap();
  let alerts = vec![a1, a2, a3];

  let active = report::filter_by_status(&alerts, "active");
  assert_eq!(active.len(), 2);
  assert_eq!(active[0].id(), "a2");
  assert_eq!(active[1].id(), "a3");

  let resolved = report::filter_by_status(&alerts, "RESOLVED");
  assert_eq!(resolved.len(), 1);
  assert_eq!(resolved[0].id(), "a1");
}

#[test]
fn time_window_zero_is_the_no_filter_sentinel() {
  let alerts = vec![alert("a1", Severity::Low), alert("a2", Severity::Low)];
  let all = report::filter_by_time_window(
    &alerts,
    |a| a.created_at(),
    0,
    now() + Duration::days(400),
  );
  assert_eq!(all.len(), alerts.len());
}

#[test]
fn time_window_keeps_recent_items_only() {
  let old = SecurityAlert::new(
    "a-old",
    "stale",
    Severity::Low,
    None,
    now() - Duration::hours(48),
  )
  .unwrap();
  let fresh = alert("a-fresh", Severity::Low);
  let alerts = vec![old, fresh];

  let recent =
    report::filter_by_time_window(&alerts, |a| a.created_at(), 24, now());
  assert_eq!(recent.len(), 1);
  assert_eq!(recent[0].id(), "a-fresh");
}

#[test]
fn count_where_tallies_matches() {
  let alerts = vec![
    alert("a1", Severity::Critical),
    alert("a2", Severity::Low),
    alert("a3", Severity::Critical),
  ];
  let n = report::count_where(&alerts, |a| {
    a.severity() == Severity::Critical
  });
  assert_eq!(n, 2);
}

#[test]
fn health_score_tiers() {
  // Any Active Critical alert.
  let critical = vec![alert("a1", Severity::Critical)];
  assert_eq!(report::compute_health_score(&critical), 0.3);

  // More than 5 Active alerts, none Critical.
  let many: Vec<SecurityAlert> = (0..6)
    .map(|i| alert(&format!("a{i}"), Severity::Medium))
    .collect();
  assert_eq!(report::compute_health_score(&many), 0.5);

  // A handful of non-critical Active alerts.
  let few = vec![alert("a1", Severity::High)];
  assert_eq!(report::compute_health_score(&few), 0.95);

  // No alerts at all.
  assert_eq!(report::compute_health_score(&[]), 0.95);
}

#[test]
fn health_score_ignores_non_active_alerts() {
  let mut resolved_critical = alert("a1", Severity::Critical);
  resolved_critical.resolve("x", now()).unwrap();
  let mut acked_critical = alert("a2", Severity::Critical);
  acked_critical.acknowledge("x", now()).unwrap();

  let alerts = vec![resolved_critical, acked_critical];
  assert_eq!(report::compute_health_score(&alerts), 0.95);
}
