//! Client and order queries backing the directory.

use jiff::civil::Date;
use log::warn;
use rusqlite::{params, OptionalExtension};

use super::{format_date, parse_date_lenient, Database};
use crate::{
    error::{AgendaError, DatabaseResultExt, Result},
    models::{Client, Delivery, Order},
    params::{NewClient, NewOrder},
    store::Directory,
};

const INSERT_CLIENT_SQL: &str = "INSERT INTO clients (name, phone, converted_on) VALUES (?1, ?2, ?3)";
const SELECT_CLIENTS_SQL: &str = "SELECT id, name, phone, converted_on FROM clients ORDER BY name COLLATE NOCASE, id";
const SELECT_CLIENT_NAME_SQL: &str = "SELECT name FROM clients WHERE id = ?1";
const CHECK_CLIENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?1)";

const ORDER_COLUMNS: &str = "id, client_id, service, price, start_date, end_date, delivered";
const INSERT_ORDER_SQL: &str = "INSERT INTO orders (client_id, service, price, start_date, end_date, delivered) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ORDER_LABEL_SQL: &str = "SELECT service FROM orders WHERE id = ?1";
const UPDATE_DELIVERY_SQL: &str = "UPDATE orders SET delivered = ?1 WHERE id = ?2";
const COUNT_ORDER_TASKS_SQL: &str = "SELECT COUNT(*) FROM tasks WHERE order_id = ?1";
const DELETE_ORDER_SQL: &str = "DELETE FROM orders WHERE id = ?1";

impl Database {
    fn build_client_from_row(row: &rusqlite::Row) -> rusqlite::Result<Client> {
        let converted_on: Option<String> = row.get(3)?;
        Ok(Client {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            phone: row.get(2)?,
            converted_on: parse_date_lenient(converted_on.as_deref()),
        })
    }

    /// Order dates that fail to parse decode as unknown so the order still
    /// lists; deadline evaluation then fails open.
    fn build_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        let id = row.get::<_, i64>(0)? as u64;
        let date_column = |index: usize, column: &str| -> rusqlite::Result<Option<Date>> {
            let raw: Option<String> = row.get(index)?;
            let parsed = parse_date_lenient(raw.as_deref());
            if parsed.is_none() && raw.as_deref().is_some_and(|s| !s.trim().is_empty()) {
                warn!("Order {id} has an unreadable {column}: {raw:?}");
            }
            Ok(parsed)
        };
        Ok(Order {
            id,
            client_id: row.get::<_, i64>(1)? as u64,
            service: row.get(2)?,
            price: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
            start_date: date_column(4, "start_date")?,
            end_date: date_column(5, "end_date")?,
            delivery: Delivery::from_db(row.get(6)?),
        })
    }

    fn select_orders(&self, sql: &str, values: &[&dyn rusqlite::ToSql]) -> Result<Vec<Order>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare order query")?;
        let orders = stmt
            .query_map(values, Self::build_order_from_row)
            .db_context("Failed to query orders")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read order rows")?;
        Ok(orders)
    }

    /// Adds a client.
    pub fn add_client(&mut self, client: &NewClient) -> Result<Client> {
        let name = client.name.trim();
        if name.is_empty() {
            return Err(AgendaError::invalid_input("name").with_reason("Name cannot be empty"));
        }
        self.connection
            .execute(
                INSERT_CLIENT_SQL,
                params![name, client.phone.as_deref(), client.converted_on.map(format_date)],
            )
            .db_context("Failed to insert client")?;

        Ok(Client {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            phone: client.phone.clone(),
            converted_on: client.converted_on,
        })
    }

    /// All clients, by name.
    pub fn list_clients(&self) -> Result<Vec<Client>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CLIENTS_SQL)
            .db_context("Failed to prepare client query")?;
        let clients = stmt
            .query_map([], Self::build_client_from_row)
            .db_context("Failed to query clients")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read client rows")?;
        Ok(clients)
    }

    /// Adds an order for an existing client.
    pub fn add_order(&mut self, order: &NewOrder) -> Result<Order> {
        order.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let client_exists: bool = tx
            .query_row(
                CHECK_CLIENT_EXISTS_SQL,
                params![order.client_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check client existence")?;
        if !client_exists {
            return Err(AgendaError::ClientNotFound {
                id: order.client_id,
            });
        }

        tx.execute(
            INSERT_ORDER_SQL,
            params![
                order.client_id as i64,
                order.service.trim(),
                order.price,
                format_date(order.start_date),
                format_date(order.end_date),
                order.delivery.to_db(),
            ],
        )
        .db_context("Failed to insert order")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Order {
            id,
            client_id: order.client_id,
            service: order.service.trim().to_string(),
            price: order.price,
            start_date: Some(order.start_date),
            end_date: Some(order.end_date),
            delivery: order.delivery,
        })
    }

    pub fn get_order(&self, id: u64) -> Result<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_order_from_row)
            .optional()
            .db_context("Failed to query order")
    }

    /// All orders, by due date then id. Orders with no due date come last.
    pub fn list_orders(&self) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY end_date IS NULL, end_date, id"
        );
        self.select_orders(&sql, &[])
    }

    /// Orders of one client, by due date then id.
    pub fn orders_for_client(&self, client_id: u64) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE client_id = ?1 ORDER BY end_date IS NULL, end_date, id"
        );
        self.select_orders(&sql, &[&(client_id as i64)])
    }

    /// Undelivered orders due on or before `horizon`, soonest first.
    pub fn orders_due_by(&self, horizon: Date) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE (delivered IS NULL OR delivered = 0) AND end_date IS NOT NULL AND end_date <= ?1 \
             ORDER BY end_date, id"
        );
        self.select_orders(&sql, &[&format_date(horizon)])
    }

    /// Sets the delivery flag and returns the updated order.
    pub fn set_delivery(&mut self, order_id: u64, delivery: Delivery) -> Result<Order> {
        let updated = self
            .connection
            .execute(UPDATE_DELIVERY_SQL, params![delivery.to_db(), order_id as i64])
            .db_context("Failed to update delivery flag")?;
        if updated == 0 {
            return Err(AgendaError::OrderNotFound { id: order_id });
        }
        self.get_order(order_id)?
            .ok_or(AgendaError::OrderNotFound { id: order_id })
    }

    /// Deletes an order and, through the foreign key, every task linked to
    /// it. Returns the number of tasks removed.
    pub fn delete_order(&mut self, order_id: u64) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let task_count: i64 = tx
            .query_row(COUNT_ORDER_TASKS_SQL, params![order_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to count order tasks")?;

        let deleted = tx
            .execute(DELETE_ORDER_SQL, params![order_id as i64])
            .db_context("Failed to delete order")?;
        if deleted == 0 {
            return Err(AgendaError::OrderNotFound { id: order_id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task_count as usize)
    }
}

impl Directory for Database {
    fn resolve_client_name(&self, client_id: u64) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_CLIENT_NAME_SQL, params![client_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to resolve client name")
    }

    fn resolve_order_label(&self, order_id: u64) -> Result<Option<String>> {
        let service: Option<String> = self
            .connection
            .query_row(SELECT_ORDER_LABEL_SQL, params![order_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to resolve order label")?;
        Ok(service.map(|service| format!("{service} (#{order_id})")))
    }
}
