//! Calendar, deadline and KPI views for the Agenda.

use jiff::{
    civil::{Date, DateTime},
    ToSpan,
};
use log::debug;

use super::{resolve_entries, Agenda};
use crate::{
    calendar::{self, HourBand, MonthGrid, ProjectionFilter, WeekGrid},
    db::Database,
    deadline::{self, DeadlineEntry, OrderOverview, WORKLIST_HORIZON_DAYS},
    error::{AgendaError, Result},
    kpi::{self, Dashboard, DailyCounters, KpiReport},
    models::Order,
    params::{Id, OrderQuery},
    period::{pipeline_window, Periods},
    store::{Directory, TaskStore},
};

fn worklist(db: &Database, today: Date) -> Result<Vec<DeadlineEntry>> {
    let horizon = today.saturating_add(WORKLIST_HORIZON_DAYS.days());
    let orders = db.orders_due_by(horizon)?;
    let names = orders
        .iter()
        .map(|order| Ok((order.client_id, db.display_name(Some(order.client_id))?)))
        .collect::<Result<std::collections::HashMap<u64, String>>>()?;
    Ok(deadline::deadline_worklist(&orders, today, |id| {
        names.get(&id).cloned().unwrap_or_default()
    }))
}

impl Agenda {
    /// Month grid of `year`-`month`, with client names resolved.
    pub async fn project_month(
        &self,
        year: i16,
        month: i8,
        filter: &ProjectionFilter,
    ) -> Result<MonthGrid> {
        let window = calendar::month_window(year, month)?;
        let filter = filter.clone();
        self.with_db(move |db| {
            let entries = resolve_entries(&*db, db.query(window)?)?;
            debug!("Projecting {} tasks onto {year}-{month:02}", entries.len());
            calendar::project_month(year, month, entries, &filter)
        })
        .await
    }

    /// Week grid of the week containing `week_start`. Uses the configured
    /// hour band when `band` is `None`.
    pub async fn project_week(
        &self,
        week_start: Date,
        filter: &ProjectionFilter,
        band: Option<HourBand>,
    ) -> Result<WeekGrid> {
        let window = calendar::week_window(week_start);
        let band = band.unwrap_or(self.hour_band);
        let filter = filter.clone();
        self.with_db(move |db| {
            let entries = resolve_entries(&*db, db.query(window)?)?;
            Ok(calendar::project_week(week_start, entries, &filter, band))
        })
        .await
    }

    /// Deadline status of one order on `today`.
    pub async fn evaluate_deadline(&self, params: &Id, today: Date) -> Result<OrderOverview> {
        let id = params.id;
        self.with_db(move |db| {
            let order = db.get_order(id)?.ok_or(AgendaError::OrderNotFound { id })?;
            let name = db.display_name(Some(order.client_id))?;
            Ok(OrderOverview::new(order, name, today))
        })
        .await
    }

    /// Undelivered orders due within the worklist horizon or already late.
    pub async fn deadline_worklist(&self, today: Date) -> Result<Vec<DeadlineEntry>> {
        self.with_db(move |db| worklist(db, today)).await
    }

    /// Orders matching `query`, each with its status on `today`.
    pub async fn list_orders(&self, query: &OrderQuery, today: Date) -> Result<Vec<OrderOverview>> {
        let query = query.clone();
        self.with_db(move |db| {
            let orders = match query.client_id {
                Some(client_id) => db.orders_for_client(client_id)?,
                None => db.list_orders()?,
            };
            let mut overviews = Vec::with_capacity(orders.len());
            for order in orders {
                let name = db.display_name(Some(order.client_id))?;
                if deadline::order_matches(&order, &name, &query, today) {
                    overviews.push(OrderOverview::new(order, name, today));
                }
            }
            Ok(overviews)
        })
        .await
    }

    /// Metrics for the five standard periods relative to `now`.
    pub async fn compute_kpis(&self, now: DateTime) -> Result<KpiReport> {
        let periods = Periods::relative_to(now.date());
        self.with_db(move |db| {
            let tasks = db.query(periods.span())?;
            let clients = db.list_clients()?;
            let orders: Vec<Order> = db.list_orders()?;
            Ok(kpi::compute_kpis(&periods.all(), &tasks, &clients, &orders))
        })
        .await
    }

    /// Counters, appointments, agenda and deadlines for the day of `now`.
    pub async fn daily_dashboard(&self, now: DateTime) -> Result<Dashboard> {
        let today = now.date();
        self.with_db(move |db| {
            let pipeline_tasks = db.query(pipeline_window(today))?;
            let todays: Vec<_> = pipeline_tasks
                .iter()
                .filter(|t| t.days().contains(today))
                .cloned()
                .collect();
            let orders = db.list_orders()?;

            Ok(Dashboard {
                day: today,
                counters: DailyCounters::compute(today, &todays, &orders),
                appointments: kpi::appointments_by_kind(&todays, today),
                pipeline: kpi::call_pipeline(&pipeline_tasks, today),
                agenda: resolve_entries(&*db, todays)?,
                deadlines: worklist(db, today)?,
            })
        })
        .await
    }
}
