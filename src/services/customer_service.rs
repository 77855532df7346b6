use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{LifecycleError, Result};
use crate::models::{CreateCustomer, Customer, UpdateCustomer};
use crate::repositories::CustomerDirectory;
use crate::services::EventService;

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerDirectory>,
    events: EventService,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerDirectory>, events: EventService) -> Self {
        Self { customers, events }
    }

    pub async fn create(&self, payload: CreateCustomer) -> Result<Customer> {
        payload.validate().map_err(LifecycleError::Validation)?;

        let customer = Customer::new(payload);
        self.customers.create(&customer).await?;
        info!("Created customer {} ({})", customer.id, customer.organization_name);

        Ok(customer)
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| LifecycleError::customer_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.list_all().await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCustomer) -> Result<Customer> {
        payload.validate().map_err(LifecycleError::Validation)?;

        let mut customer = self.get(id).await?;
        customer.apply(payload);
        self.customers.update(&customer).await?;
        info!("Updated customer {}", id);

        Ok(customer)
    }

    /// Removes the customer after deleting each of its events, so every
    /// event's summary goes with it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let events = match self.events.list_events_for_customer(id).await {
            Ok(events) => events,
            Err(LifecycleError::Validation(_)) => {
                return Err(LifecycleError::customer_not_found(id))
            }
            Err(err) => return Err(err),
        };

        for event in events {
            match self.events.delete_event(event.id).await {
                Ok(()) => {}
                // Already removed by a concurrent delete.
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        if !self.customers.delete(id).await? {
            return Err(LifecycleError::customer_not_found(id));
        }
        info!("Deleted customer {}", id);

        Ok(())
    }
}
