//! [`SqliteStore`] — the SQLite implementation of [`FacilityStore`].
//!
//! Each entity gets one write helper shared by its `add_*` and `update_*`
//! methods: the column/parameter numbering is identical in the INSERT and
//! UPDATE statements, with `?1` always the primary key.

use std::path::Path;

use rusqlite::OptionalExtension as _;

use warden_core::{
  access::AccessGrant,
  alert::SecurityAlert,
  cell::Cell,
  log::SecurityLog,
  person::{Employee, Prisoner, Visitor},
  store::FacilityStore,
  task::Task,
  visit::Visit,
};

use crate::{
  Error, Result,
  encode::{
    RawAlert, RawCell, RawEmployee, RawGrant, RawLog, RawPrisoner, RawTask,
    RawVisit, RawVisitor, encode_alert_status, encode_dt,
    encode_employee_status, encode_expiry, encode_log_level, encode_occupants,
    encode_opt_dt, encode_permission_level, encode_prisoner_status,
    encode_severity, encode_stamp, encode_task_status, encode_visit_status,
    encode_visitor_status,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Warden records store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  fn require_row(n: usize, entity: &'static str, id: String) -> Result<()> {
    if n == 0 {
      return Err(Error::NotFound { entity, id });
    }
    Ok(())
  }

  // ── Write helpers ─────────────────────────────────────────────────────────

  async fn write_prisoner(
    &self,
    sql: &'static str,
    prisoner: Prisoner,
  ) -> Result<usize> {
    let id = prisoner.id().to_owned();
    let name = prisoner.identity().name.clone();
    let phone = prisoner.identity().phone.clone();
    let cell_id = prisoner.cell_id().map(str::to_owned);
    let admitted_at = encode_dt(prisoner.admitted_at());
    let status = encode_prisoner_status(prisoner.status());
    let (released_by, released_at) = encode_stamp(prisoner.released());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            name,
            phone,
            cell_id,
            admitted_at,
            status,
            released_by,
            released_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_employee(
    &self,
    sql: &'static str,
    employee: Employee,
  ) -> Result<usize> {
    let id = employee.id().to_owned();
    let name = employee.identity().name.clone();
    let phone = employee.identity().phone.clone();
    let title = employee.title().to_owned();
    let department = employee.department().map(str::to_owned);
    let hired_at = encode_dt(employee.hired_at());
    let status = encode_employee_status(employee.status());
    let deactivated_at = encode_opt_dt(employee.deactivated_at());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            name,
            phone,
            title,
            department,
            hired_at,
            status,
            deactivated_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_visitor(
    &self,
    sql: &'static str,
    visitor: Visitor,
  ) -> Result<usize> {
    let id = visitor.id().to_owned();
    let name = visitor.identity().name.clone();
    let phone = visitor.identity().phone.clone();
    let relationship = visitor.relationship().map(str::to_owned);
    let registered_at = encode_dt(visitor.registered_at());
    let status = encode_visitor_status(visitor.status());
    let (banned_by, banned_at) = encode_stamp(visitor.banned());
    let ban_reason = visitor.ban_reason().map(str::to_owned);

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            name,
            phone,
            relationship,
            registered_at,
            status,
            banned_by,
            banned_at,
            ban_reason,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_cell(&self, sql: &'static str, cell: Cell) -> Result<usize> {
    let id = cell.id().to_owned();
    let block = cell.block().map(str::to_owned);
    let capacity = cell.capacity();
    let occupants = encode_occupants(cell.occupants())?;
    let maintenance = cell.under_maintenance();

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![id, block, capacity, occupants, maintenance],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_visit(
    &self,
    sql: &'static str,
    visit: Visit,
  ) -> Result<usize> {
    let id = visit.id().to_owned();
    let prisoner_id = visit.prisoner_id().to_owned();
    let visitor_id = visit.visitor_id().to_owned();
    let scheduled_at = encode_dt(visit.scheduled_at());
    let duration_minutes = visit.duration_minutes();
    let created_at = encode_dt(visit.created_at());
    let status = encode_visit_status(visit.status());
    let started_at = encode_opt_dt(visit.started_at());
    let completed_at = encode_opt_dt(visit.completed_at());
    let cancelled_at = encode_opt_dt(visit.cancelled_at());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            prisoner_id,
            visitor_id,
            scheduled_at,
            duration_minutes,
            created_at,
            status,
            started_at,
            completed_at,
            cancelled_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_task(&self, sql: &'static str, task: Task) -> Result<usize> {
    let id = task.id().to_owned();
    let description = task.description().to_owned();
    let assigned_to = task.assigned_to().to_owned();
    let created_at = encode_dt(task.created_at());
    let due_at = encode_opt_dt(task.due_at());
    let status = encode_task_status(task.status());
    let started_at = encode_opt_dt(task.started_at());
    let (completed_by, completed_at) = encode_stamp(task.completed());
    let cancelled_at = encode_opt_dt(task.cancelled_at());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            description,
            assigned_to,
            created_at,
            due_at,
            status,
            started_at,
            completed_by,
            completed_at,
            cancelled_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_alert(
    &self,
    sql: &'static str,
    alert: SecurityAlert,
  ) -> Result<usize> {
    let id = alert.id().to_owned();
    let message = alert.message().to_owned();
    let severity = encode_severity(alert.severity());
    let location = alert.location().map(str::to_owned);
    let created_at = encode_dt(alert.created_at());
    let status = encode_alert_status(alert.status());
    let (acknowledged_by, acknowledged_at) = encode_stamp(alert.acknowledged());
    let (resolved_by, resolved_at) = encode_stamp(alert.resolved());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            message,
            severity,
            location,
            created_at,
            status,
            acknowledged_by,
            acknowledged_at,
            resolved_by,
            resolved_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }

  async fn write_grant(
    &self,
    sql: &'static str,
    grant: AccessGrant,
  ) -> Result<usize> {
    let id = grant.id().to_owned();
    let holder_id = grant.holder_id().to_owned();
    let area = grant.area().to_owned();
    let level = encode_permission_level(grant.level());
    let granted_by = grant.granted_by().to_owned();
    let granted_at = encode_dt(grant.granted_at());
    let expires_on = encode_expiry(grant.expires_on());
    let active = grant.is_active();
    let (revoked_by, revoked_at) = encode_stamp(grant.revoked());

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          sql,
          rusqlite::params![
            id,
            holder_id,
            area,
            level,
            granted_by,
            granted_at,
            expires_on,
            active,
            revoked_by,
            revoked_at,
          ],
        )?)
      })
      .await?;
    Ok(n)
  }
}

// ─── FacilityStore impl ──────────────────────────────────────────────────────

impl FacilityStore for SqliteStore {
  type Error = Error;

  // ── Prisoners ─────────────────────────────────────────────────────────────

  async fn add_prisoner(&self, prisoner: Prisoner) -> Result<()> {
    self
      .write_prisoner(
        "INSERT INTO prisoners (
           id, name, phone, cell_id, admitted_at, status,
           released_by, released_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        prisoner,
      )
      .await?;
    Ok(())
  }

  async fn get_prisoner(&self, id: &str) -> Result<Option<Prisoner>> {
    let id = id.to_owned();
    let raw: Option<RawPrisoner> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, phone, cell_id, admitted_at, status,
                      released_by, released_at
               FROM prisoners WHERE id = ?1",
              rusqlite::params![id],
              RawPrisoner::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawPrisoner::into_prisoner).transpose()
  }

  async fn list_prisoners(&self) -> Result<Vec<Prisoner>> {
    let raws: Vec<RawPrisoner> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, phone, cell_id, admitted_at, status,
                  released_by, released_at
           FROM prisoners",
        )?;
        let rows = stmt
          .query_map([], RawPrisoner::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawPrisoner::into_prisoner).collect()
  }

  async fn update_prisoner(&self, prisoner: Prisoner) -> Result<()> {
    let id = prisoner.id().to_owned();
    let n = self
      .write_prisoner(
        "UPDATE prisoners SET
           name = ?2, phone = ?3, cell_id = ?4, admitted_at = ?5,
           status = ?6, released_by = ?7, released_at = ?8
         WHERE id = ?1",
        prisoner,
      )
      .await?;
    Self::require_row(n, "prisoner", id)
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn add_employee(&self, employee: Employee) -> Result<()> {
    self
      .write_employee(
        "INSERT INTO employees (
           id, name, phone, title, department, hired_at, status,
           deactivated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        employee,
      )
      .await?;
    Ok(())
  }

  async fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
    let id = id.to_owned();
    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, phone, title, department, hired_at, status,
                      deactivated_at
               FROM employees WHERE id = ?1",
              rusqlite::params![id],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self) -> Result<Vec<Employee>> {
    let raws: Vec<RawEmployee> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, phone, title, department, hired_at, status,
                  deactivated_at
           FROM employees",
        )?;
        let rows = stmt
          .query_map([], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn update_employee(&self, employee: Employee) -> Result<()> {
    let id = employee.id().to_owned();
    let n = self
      .write_employee(
        "UPDATE employees SET
           name = ?2, phone = ?3, title = ?4, department = ?5,
           hired_at = ?6, status = ?7, deactivated_at = ?8
         WHERE id = ?1",
        employee,
      )
      .await?;
    Self::require_row(n, "employee", id)
  }

  // ── Visitors ──────────────────────────────────────────────────────────────

  async fn add_visitor(&self, visitor: Visitor) -> Result<()> {
    self
      .write_visitor(
        "INSERT INTO visitors (
           id, name, phone, relationship, registered_at, status,
           banned_by, banned_at, ban_reason
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        visitor,
      )
      .await?;
    Ok(())
  }

  async fn get_visitor(&self, id: &str) -> Result<Option<Visitor>> {
    let id = id.to_owned();
    let raw: Option<RawVisitor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, phone, relationship, registered_at, status,
                      banned_by, banned_at, ban_reason
               FROM visitors WHERE id = ?1",
              rusqlite::params![id],
              RawVisitor::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawVisitor::into_visitor).transpose()
  }

  async fn list_visitors(&self) -> Result<Vec<Visitor>> {
    let raws: Vec<RawVisitor> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, phone, relationship, registered_at, status,
                  banned_by, banned_at, ban_reason
           FROM visitors",
        )?;
        let rows = stmt
          .query_map([], RawVisitor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawVisitor::into_visitor).collect()
  }

  async fn update_visitor(&self, visitor: Visitor) -> Result<()> {
    let id = visitor.id().to_owned();
    let n = self
      .write_visitor(
        "UPDATE visitors SET
           name = ?2, phone = ?3, relationship = ?4, registered_at = ?5,
           status = ?6, banned_by = ?7, banned_at = ?8, ban_reason = ?9
         WHERE id = ?1",
        visitor,
      )
      .await?;
    Self::require_row(n, "visitor", id)
  }

  // ── Cells ─────────────────────────────────────────────────────────────────

  async fn add_cell(&self, cell: Cell) -> Result<()> {
    self
      .write_cell(
        "INSERT INTO cells (id, block, capacity, occupants, maintenance)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        cell,
      )
      .await?;
    Ok(())
  }

  async fn get_cell(&self, id: &str) -> Result<Option<Cell>> {
    let id = id.to_owned();
    let raw: Option<RawCell> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, block, capacity, occupants, maintenance
               FROM cells WHERE id = ?1",
              rusqlite::params![id],
              RawCell::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawCell::into_cell).transpose()
  }

  async fn list_cells(&self) -> Result<Vec<Cell>> {
    let raws: Vec<RawCell> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, block, capacity, occupants, maintenance FROM cells",
        )?;
        let rows = stmt
          .query_map([], RawCell::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawCell::into_cell).collect()
  }

  async fn update_cell(&self, cell: Cell) -> Result<()> {
    let id = cell.id().to_owned();
    let n = self
      .write_cell(
        "UPDATE cells SET
           block = ?2, capacity = ?3, occupants = ?4, maintenance = ?5
         WHERE id = ?1",
        cell,
      )
      .await?;
    Self::require_row(n, "cell", id)
  }

  async fn update_cell_and_prisoner(
    &self,
    cell: Cell,
    prisoner: Prisoner,
  ) -> Result<()> {
    let cell_id = cell.id().to_owned();
    let block = cell.block().map(str::to_owned);
    let capacity = cell.capacity();
    let occupants = encode_occupants(cell.occupants())?;
    let maintenance = cell.under_maintenance();

    let prisoner_id = prisoner.id().to_owned();
    let name = prisoner.identity().name.clone();
    let phone = prisoner.identity().phone.clone();
    let assigned_cell = prisoner.cell_id().map(str::to_owned);
    let admitted_at = encode_dt(prisoner.admitted_at());
    let status = encode_prisoner_status(prisoner.status());
    let (released_by, released_at) = encode_stamp(prisoner.released());

    let cid = cell_id.clone();
    let pid = prisoner_id.clone();
    let (n_cell, n_prisoner) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n_cell = tx.execute(
          "UPDATE cells SET
             block = ?2, capacity = ?3, occupants = ?4, maintenance = ?5
           WHERE id = ?1",
          rusqlite::params![cid, block, capacity, occupants, maintenance],
        )?;
        let n_prisoner = tx.execute(
          "UPDATE prisoners SET
             name = ?2, phone = ?3, cell_id = ?4, admitted_at = ?5,
             status = ?6, released_by = ?7, released_at = ?8
           WHERE id = ?1",
          rusqlite::params![
            pid,
            name,
            phone,
            assigned_cell,
            admitted_at,
            status,
            released_by,
            released_at,
          ],
        )?;
        // Neither row lands unless both exist.
        if n_cell == 0 || n_prisoner == 0 {
          tx.rollback()?;
        } else {
          tx.commit()?;
        }
        Ok((n_cell, n_prisoner))
      })
      .await?;
    Self::require_row(n_cell, "cell", cell_id)?;
    Self::require_row(n_prisoner, "prisoner", prisoner_id)?;
    Ok(())
  }

  // ── Visits ────────────────────────────────────────────────────────────────

  async fn add_visit(&self, visit: Visit) -> Result<()> {
    self
      .write_visit(
        "INSERT INTO visits (
           id, prisoner_id, visitor_id, scheduled_at, duration_minutes,
           created_at, status, started_at, completed_at, cancelled_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        visit,
      )
      .await?;
    Ok(())
  }

  async fn get_visit(&self, id: &str) -> Result<Option<Visit>> {
    let id = id.to_owned();
    let raw: Option<RawVisit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, prisoner_id, visitor_id, scheduled_at,
                      duration_minutes, created_at, status, started_at,
                      completed_at, cancelled_at
               FROM visits WHERE id = ?1",
              rusqlite::params![id],
              RawVisit::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawVisit::into_visit).transpose()
  }

  async fn list_visits(&self) -> Result<Vec<Visit>> {
    let raws: Vec<RawVisit> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, prisoner_id, visitor_id, scheduled_at,
                  duration_minutes, created_at, status, started_at,
                  completed_at, cancelled_at
           FROM visits",
        )?;
        let rows = stmt
          .query_map([], RawVisit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawVisit::into_visit).collect()
  }

  async fn list_visits_for_prisoner(
    &self,
    prisoner_id: &str,
  ) -> Result<Vec<Visit>> {
    let prisoner_id = prisoner_id.to_owned();
    let raws: Vec<RawVisit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, prisoner_id, visitor_id, scheduled_at,
                  duration_minutes, created_at, status, started_at,
                  completed_at, cancelled_at
           FROM visits WHERE prisoner_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![prisoner_id], RawVisit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawVisit::into_visit).collect()
  }

  async fn update_visit(&self, visit: Visit) -> Result<()> {
    let id = visit.id().to_owned();
    let n = self
      .write_visit(
        "UPDATE visits SET
           prisoner_id = ?2, visitor_id = ?3, scheduled_at = ?4,
           duration_minutes = ?5, created_at = ?6, status = ?7,
           started_at = ?8, completed_at = ?9, cancelled_at = ?10
         WHERE id = ?1",
        visit,
      )
      .await?;
    Self::require_row(n, "visit", id)
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn add_task(&self, task: Task) -> Result<()> {
    self
      .write_task(
        "INSERT INTO tasks (
           id, description, assigned_to, created_at, due_at, status,
           started_at, completed_by, completed_at, cancelled_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        task,
      )
      .await?;
    Ok(())
  }

  async fn get_task(&self, id: &str) -> Result<Option<Task>> {
    let id = id.to_owned();
    let raw: Option<RawTask> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, description, assigned_to, created_at, due_at,
                      status, started_at, completed_by, completed_at,
                      cancelled_at
               FROM tasks WHERE id = ?1",
              rusqlite::params![id],
              RawTask::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawTask::into_task).transpose()
  }

  async fn list_tasks(&self) -> Result<Vec<Task>> {
    let raws: Vec<RawTask> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, description, assigned_to, created_at, due_at, status,
                  started_at, completed_by, completed_at, cancelled_at
           FROM tasks",
        )?;
        let rows = stmt
          .query_map([], RawTask::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn update_task(&self, task: Task) -> Result<()> {
    let id = task.id().to_owned();
    let n = self
      .write_task(
        "UPDATE tasks SET
           description = ?2, assigned_to = ?3, created_at = ?4, due_at = ?5,
           status = ?6, started_at = ?7, completed_by = ?8,
           completed_at = ?9, cancelled_at = ?10
         WHERE id = ?1",
        task,
      )
      .await?;
    Self::require_row(n, "task", id)
  }

  // ── Alerts ────────────────────────────────────────────────────────────────

  async fn add_alert(&self, alert: SecurityAlert) -> Result<()> {
    self
      .write_alert(
        "INSERT INTO alerts (
           id, message, severity, location, created_at, status,
           acknowledged_by, acknowledged_at, resolved_by, resolved_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        alert,
      )
      .await?;
    Ok(())
  }

  async fn get_alert(&self, id: &str) -> Result<Option<SecurityAlert>> {
    let id = id.to_owned();
    let raw: Option<RawAlert> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, message, severity, location, created_at, status,
                      acknowledged_by, acknowledged_at, resolved_by,
                      resolved_at
               FROM alerts WHERE id = ?1",
              rusqlite::params![id],
              RawAlert::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawAlert::into_alert).transpose()
  }

  async fn list_alerts(&self) -> Result<Vec<SecurityAlert>> {
    let raws: Vec<RawAlert> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, message, severity, location, created_at, status,
                  acknowledged_by, acknowledged_at, resolved_by, resolved_at
           FROM alerts",
        )?;
        let rows = stmt
          .query_map([], RawAlert::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawAlert::into_alert).collect()
  }

  async fn update_alert(&self, alert: SecurityAlert) -> Result<()> {
    let id = alert.id().to_owned();
    let n = self
      .write_alert(
        "UPDATE alerts SET
           message = ?2, severity = ?3, location = ?4, created_at = ?5,
           status = ?6, acknowledged_by = ?7, acknowledged_at = ?8,
           resolved_by = ?9, resolved_at = ?10
         WHERE id = ?1",
        alert,
      )
      .await?;
    Self::require_row(n, "alert", id)
  }

  // ── Logs — append-only ────────────────────────────────────────────────────

  async fn record_log(&self, entry: SecurityLog) -> Result<()> {
    let id = entry.id().to_owned();
    let message = entry.message().to_owned();
    let level = encode_log_level(entry.level());
    let source = entry.source().map(str::to_owned);
    let logged_at = encode_dt(entry.logged_at());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO logs (id, message, level, source, logged_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id, message, level, source, logged_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_logs(&self) -> Result<Vec<SecurityLog>> {
    let raws: Vec<RawLog> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, message, level, source, logged_at
           FROM logs ORDER BY logged_at",
        )?;
        let rows = stmt
          .query_map([], RawLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawLog::into_log).collect()
  }

  // ── Access grants ─────────────────────────────────────────────────────────

  async fn add_grant(&self, grant: AccessGrant) -> Result<()> {
    self
      .write_grant(
        "INSERT INTO grants (
           id, holder_id, area, level, granted_by, granted_at, expires_on,
           active, revoked_by, revoked_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        grant,
      )
      .await?;
    Ok(())
  }

  async fn get_grant(&self, id: &str) -> Result<Option<AccessGrant>> {
    let id = id.to_owned();
    let raw: Option<RawGrant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, holder_id, area, level, granted_by, granted_at,
                      expires_on, active, revoked_by, revoked_at
               FROM grants WHERE id = ?1",
              rusqlite::params![id],
              RawGrant::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawGrant::into_grant).transpose()
  }

  async fn list_grants(&self) -> Result<Vec<AccessGrant>> {
    let raws: Vec<RawGrant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, holder_id, area, level, granted_by, granted_at,
                  expires_on, active, revoked_by, revoked_at
           FROM grants",
        )?;
        let rows = stmt
          .query_map([], RawGrant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawGrant::into_grant).collect()
  }

  async fn list_grants_for_holder(
    &self,
    holder_id: &str,
  ) -> Result<Vec<AccessGrant>> {
    let holder_id = holder_id.to_owned();
    let raws: Vec<RawGrant> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, holder_id, area, level, granted_by, granted_at,
                  expires_on, active, revoked_by, revoked_at
           FROM grants WHERE holder_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![holder_id], RawGrant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawGrant::into_grant).collect()
  }

  async fn update_grant(&self, grant: AccessGrant) -> Result<()> {
    let id = grant.id().to_owned();
    let n = self
      .write_grant(
        "UPDATE grants SET
           holder_id = ?2, area = ?3, level = ?4, granted_by = ?5,
           granted_at = ?6, expires_on = ?7, active = ?8, revoked_by = ?9,
           revoked_at = ?10
         WHERE id = ?1",
        grant,
      )
      .await?;
    Self::require_row(n, "grant", id)
  }
}
