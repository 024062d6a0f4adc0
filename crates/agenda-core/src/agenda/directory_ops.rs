//! Client and order maintenance for the Agenda.

use log::info;

use super::Agenda;
use crate::{
    error::Result,
    models::{Client, Order},
    params::{Id, NewClient, NewOrder, SetDelivery},
};

impl Agenda {
    /// Adds a client.
    pub async fn add_client(&self, params: &NewClient) -> Result<Client> {
        let params = params.clone();
        self.with_db(move |db| {
            let client = db.add_client(&params)?;
            info!("Added client {} ({})", client.id, client.name);
            Ok(client)
        })
        .await
    }

    /// All clients, by name.
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.with_db(|db| db.list_clients()).await
    }

    /// Adds an order for an existing client.
    pub async fn add_order(&self, params: &NewOrder) -> Result<Order> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            let order = db.add_order(&params)?;
            info!("Added order {} for client {}", order.id, order.client_id);
            Ok(order)
        })
        .await
    }

    /// Sets the delivery flag of an order.
    pub async fn set_delivery(&self, params: &SetDelivery) -> Result<Order> {
        let params = params.clone();
        self.with_db(move |db| db.set_delivery(params.order_id, params.delivery))
            .await
    }

    /// Deletes an order together with its tasks. Returns the number of tasks
    /// removed.
    pub async fn delete_order(&self, params: &Id) -> Result<usize> {
        let id = params.id;
        self.with_db(move |db| {
            let removed = db.delete_order(id)?;
            info!("Deleted order {id} and {removed} linked tasks");
            Ok(removed)
        })
        .await
    }
}
