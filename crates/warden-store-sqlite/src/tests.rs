use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use warden_core::{
  access::{AccessGrant, PermissionLevel},
  alert::{AlertStatus, SecurityAlert, Severity},
  cell::Cell,
  identity::Identity,
  log::{LogLevel, SecurityLog},
  person::{
    Employee, EmployeeStatus, Prisoner, PrisonerStatus, Visitor,
    VisitorStatus,
  },
  store::FacilityStore,
  task::{Task, TaskStatus},
  visit::{Visit, VisitStatus},
};

use crate::{Error, SqliteStore, encode::decode_expiry};

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn identity(id: &str, name: &str) -> Identity {
  Identity::new(id, name, Some("555-0100".into())).unwrap()
}

async fn store() -> SqliteStore { SqliteStore::open_in_memory().await.unwrap() }

// ─── Prisoners ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn prisoner_round_trip() {
  let store = store().await;
  let prisoner = Prisoner::new(identity("p-1", "John Doe"), now());
  store.add_prisoner(prisoner).await.unwrap();

  let got = store.get_prisoner("p-1").await.unwrap().unwrap();
  assert_eq!(got.id(), "p-1");
  assert_eq!(got.identity().name, "John Doe");
  assert_eq!(got.identity().phone.as_deref(), Some("555-0100"));
  assert_eq!(got.admitted_at(), now());
  assert_eq!(got.status(), PrisonerStatus::InCustody);
  assert!(got.cell_id().is_none());
  assert!(got.released().is_none());
}

#[tokio::test]
async fn prisoner_release_persists() {
  let store = store().await;
  store
    .add_prisoner(Prisoner::new(identity("p-1", "John Doe"), now()))
    .await
    .unwrap();

  let mut prisoner = store.get_prisoner("p-1").await.unwrap().unwrap();
  prisoner.move_to_cell("c-1").unwrap();
  store.update_prisoner(prisoner.clone()).await.unwrap();
  prisoner.release("warden-1", now()).unwrap();
  store.update_prisoner(prisoner).await.unwrap();

  let got = store.get_prisoner("p-1").await.unwrap().unwrap();
  assert_eq!(got.status(), PrisonerStatus::Released);
  assert!(got.cell_id().is_none());
  let stamp = got.released().unwrap();
  assert_eq!(stamp.by, "warden-1");
  assert_eq!(stamp.at, now());
}

#[tokio::test]
async fn get_unknown_prisoner_is_none() {
  let store = store().await;
  assert!(store.get_prisoner("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_prisoner_is_not_found() {
  let store = store().await;
  let prisoner = Prisoner::new(identity("ghost", "Nobody"), now());
  let err = store.update_prisoner(prisoner).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "prisoner", .. }));
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn employee_deactivation_persists() {
  let store = store().await;
  let employee = Employee::new(
    identity("e-1", "Jane Roe"),
    "Guard",
    Some("Security".into()),
    now(),
  )
  .unwrap();
  store.add_employee(employee).await.unwrap();

  let mut employee = store.get_employee("e-1").await.unwrap().unwrap();
  employee.promote("Senior Guard").unwrap();
  employee.deactivate(now()).unwrap();
  store.update_employee(employee).await.unwrap();

  let got = store.get_employee("e-1").await.unwrap().unwrap();
  assert_eq!(got.title(), "Senior Guard");
  assert_eq!(got.department(), Some("Security"));
  assert_eq!(got.status(), EmployeeStatus::Inactive);
  assert_eq!(got.deactivated_at(), Some(now()));
}

#[tokio::test]
async fn list_employees_returns_all() {
  let store = store().await;
  for i in 0..3 {
    let employee = Employee::new(
      identity(&format!("e-{i}"), &format!("Employee {i}")),
      "Guard",
      None,
      now(),
    )
    .unwrap();
    store.add_employee(employee).await.unwrap();
  }
  assert_eq!(store.list_employees().await.unwrap().len(), 3);
}

// ─── Visitors ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn visitor_ban_persists() {
  let store = store().await;
  let visitor =
    Visitor::new(identity("v-1", "Sam Lee"), Some("sibling".into()), now());
  store.add_visitor(visitor).await.unwrap();

  let mut visitor = store.get_visitor("v-1").await.unwrap().unwrap();
  visitor.ban("warden-1", Some("contraband".into()), now()).unwrap();
  store.update_visitor(visitor).await.unwrap();

  let got = store.get_visitor("v-1").await.unwrap().unwrap();
  assert_eq!(got.status(), VisitorStatus::Banned);
  assert_eq!(got.banned().unwrap().by, "warden-1");
  assert_eq!(got.ban_reason(), Some("contraband"));
}

// ─── Cells ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cell_occupants_round_trip() {
  let store = store().await;
  let mut cell = Cell::new("c-1", Some("B".into()), 2).unwrap();
  cell.assign("p-1").unwrap();
  cell.assign("p-2").unwrap();
  store.add_cell(cell).await.unwrap();

  let got = store.get_cell("c-1").await.unwrap().unwrap();
  assert_eq!(got.block(), Some("B"));
  assert_eq!(got.capacity(), 2);
  assert_eq!(got.occupants(), ["p-1".to_owned(), "p-2".to_owned()]);
  assert!(!got.under_maintenance());
}

#[tokio::test]
async fn paired_cell_and_prisoner_update_is_atomic() {
  let store = store().await;
  store.add_cell(Cell::new("c-1", None, 2).unwrap()).await.unwrap();

  let mut cell = store.get_cell("c-1").await.unwrap().unwrap();
  cell.assign("ghost").unwrap();
  let prisoner = Prisoner::new(identity("ghost", "Nobody"), now());

  // The prisoner row does not exist, so the whole write must roll back.
  let err =
    store.update_cell_and_prisoner(cell, prisoner).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "prisoner", .. }));

  let got = store.get_cell("c-1").await.unwrap().unwrap();
  assert!(got.occupants().is_empty());
}

#[tokio::test]
async fn cell_maintenance_flag_persists() {
  let store = store().await;
  store.add_cell(Cell::new("c-1", None, 4).unwrap()).await.unwrap();

  let mut cell = store.get_cell("c-1").await.unwrap().unwrap();
  cell.begin_maintenance();
  store.update_cell(cell).await.unwrap();

  let got = store.get_cell("c-1").await.unwrap().unwrap();
  assert!(got.under_maintenance());
}

// ─── Visits ──────────────────────────────────────────────────────────────────

async fn seed_visit_parents(store: &SqliteStore) {
  store
    .add_prisoner(Prisoner::new(identity("p-1", "John Doe"), now()))
    .await
    .unwrap();
  store
    .add_prisoner(Prisoner::new(identity("p-2", "Max Moe"), now()))
    .await
    .unwrap();
  store
    .add_visitor(Visitor::new(identity("v-1", "Sam Lee"), None, now()))
    .await
    .unwrap();
}

#[tokio::test]
async fn visit_lifecycle_persists() {
  let store = store().await;
  seed_visit_parents(&store).await;

  let visit = Visit::new("vi-1", "p-1", "v-1", now(), 30, now()).unwrap();
  store.add_visit(visit).await.unwrap();

  let mut visit = store.get_visit("vi-1").await.unwrap().unwrap();
  visit.begin(now()).unwrap();
  visit.complete(now()).unwrap();
  store.update_visit(visit).await.unwrap();

  let got = store.get_visit("vi-1").await.unwrap().unwrap();
  assert_eq!(got.status(), VisitStatus::Completed);
  assert_eq!(got.duration_minutes(), 30);
  assert_eq!(got.started_at(), Some(now()));
  assert_eq!(got.completed_at(), Some(now()));
  assert!(got.cancelled_at().is_none());
}

#[tokio::test]
async fn list_visits_for_prisoner_filters() {
  let store = store().await;
  seed_visit_parents(&store).await;

  for (id, prisoner) in [("vi-1", "p-1"), ("vi-2", "p-2"), ("vi-3", "p-1")] {
    let visit = Visit::new(id, prisoner, "v-1", now(), 30, now()).unwrap();
    store.add_visit(visit).await.unwrap();
  }

  let visits = store.list_visits_for_prisoner("p-1").await.unwrap();
  assert_eq!(visits.len(), 2);
  assert!(visits.iter().all(|v| v.prisoner_id() == "p-1"));
  assert_eq!(store.list_visits().await.unwrap().len(), 3);
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn task_completion_persists() {
  let store = store().await;
  let task =
    Task::new("t-1", "Patrol block C", "e-1", Some(now()), now()).unwrap();
  store.add_task(task).await.unwrap();

  let mut task = store.get_task("t-1").await.unwrap().unwrap();
  task.start(now()).unwrap();
  task.complete("e-1", now()).unwrap();
  store.update_task(task).await.unwrap();

  let got = store.get_task("t-1").await.unwrap().unwrap();
  assert_eq!(got.status(), TaskStatus::Completed);
  assert_eq!(got.started_at(), Some(now()));
  assert_eq!(got.completed().unwrap().by, "e-1");
  assert_eq!(got.due_at(), Some(now()));
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alert_stamps_round_trip() {
  let store = store().await;
  let alert = SecurityAlert::new(
    "a-1",
    "Perimeter breach",
    Severity::High,
    Some("yard".into()),
    now(),
  )
  .unwrap();
  store.add_alert(alert).await.unwrap();

  let mut alert = store.get_alert("a-1").await.unwrap().unwrap();
  alert.acknowledge("e-1", now()).unwrap();
  alert.resolve("e-2", now()).unwrap();
  store.update_alert(alert).await.unwrap();

  let got = store.get_alert("a-1").await.unwrap().unwrap();
  assert_eq!(got.status(), AlertStatus::Resolved);
  assert_eq!(got.severity(), Severity::High);
  assert_eq!(got.location(), Some("yard"));
  assert_eq!(got.acknowledged().unwrap().by, "e-1");
  assert_eq!(got.resolved().unwrap().by, "e-2");
}

// ─── Logs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn logs_list_in_time_order() {
  let store = store().await;
  let later = Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap();
  store
    .record_log(
      SecurityLog::new("l-2", "second", LogLevel::Warning, None, later)
        .unwrap(),
    )
    .await
    .unwrap();
  store
    .record_log(
      SecurityLog::new(
        "l-1",
        "first",
        LogLevel::Info,
        Some("gate".into()),
        now(),
      )
      .unwrap(),
    )
    .await
    .unwrap();

  let logs = store.list_logs().await.unwrap();
  assert_eq!(logs.len(), 2);
  assert_eq!(logs[0].id(), "l-1");
  assert_eq!(logs[0].source(), Some("gate"));
  assert_eq!(logs[1].level(), LogLevel::Warning);
}

// ─── Grants ──────────────────────────────────────────────────────────────────

fn grant(id: &str, holder: &str, expires: Option<NaiveDate>) -> AccessGrant {
  AccessGrant::new(
    id,
    holder,
    "armory",
    PermissionLevel::Edit,
    "warden-1",
    expires,
    now(),
  )
  .unwrap()
}

#[tokio::test]
async fn grant_revocation_persists() {
  let store = store().await;
  let expires = NaiveDate::from_ymd_opt(2025, 1, 1);
  store.add_grant(grant("g-1", "e-1", expires)).await.unwrap();

  let mut grant = store.get_grant("g-1").await.unwrap().unwrap();
  grant.revoke("warden-2", now()).unwrap();
  store.update_grant(grant).await.unwrap();

  let got = store.get_grant("g-1").await.unwrap().unwrap();
  assert!(!got.is_active());
  assert_eq!(got.revoked().unwrap().by, "warden-2");
  assert_eq!(got.expires_on(), expires);
  assert_eq!(got.level(), PermissionLevel::Edit);
}

#[tokio::test]
async fn list_grants_for_holder_filters() {
  let store = store().await;
  store.add_grant(grant("g-1", "e-1", None)).await.unwrap();
  store.add_grant(grant("g-2", "e-2", None)).await.unwrap();
  store.add_grant(grant("g-3", "e-1", None)).await.unwrap();

  let grants = store.list_grants_for_holder("e-1").await.unwrap();
  assert_eq!(grants.len(), 2);
  assert!(grants.iter().all(|g| g.holder_id() == "e-1"));
  assert_eq!(store.list_grants().await.unwrap().len(), 3);
}

// ─── Column decoding ─────────────────────────────────────────────────────────

#[test]
fn malformed_expiry_decodes_as_permanent() {
  assert_eq!(
    decode_expiry(Some("2024-06-15")),
    NaiveDate::from_ymd_opt(2024, 6, 15),
  );
  assert_eq!(decode_expiry(Some("not-a-date")), None);
  assert_eq!(decode_expiry(None), None);
}
