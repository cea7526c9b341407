use async_trait::async_trait;
use eyre::{eyre, Result};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tutorgrid_core::models::{ScheduleSlot, SlotDetails, SlotId};
use tutorgrid_core::store::SlotStore;

/// Slot store held in process memory, keyed by slot id.
#[derive(Debug, Default)]
pub struct InMemorySlotStore {
    slots: RwLock<BTreeMap<SlotId, ScheduleSlot>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. A later slot with a repeated id replaces the earlier one.
    pub fn with_slots(slots: impl IntoIterator<Item = ScheduleSlot>) -> Self {
        let slots = slots.into_iter().map(|slot| (slot.id, slot)).collect();
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn list_all(&self) -> Result<Vec<ScheduleSlot>> {
        let slots = self.slots.read().await;
        tracing::debug!("Listing {} slots", slots.len());
        Ok(slots.values().cloned().collect())
    }

    async fn get(&self, id: SlotId) -> Result<Option<ScheduleSlot>> {
        tracing::debug!("Getting slot by id: {}", id);
        Ok(self.slots.read().await.get(&id).cloned())
    }

    async fn create(&self, details: SlotDetails) -> Result<ScheduleSlot> {
        let mut slots = self.slots.write().await;

        let mut id = SlotId::random();
        while slots.contains_key(&id) {
            id = SlotId::random();
        }

        let slot = ScheduleSlot::new(id, details);
        slots.insert(id, slot.clone());

        tracing::debug!("Slot created: id={}", id);
        Ok(slot)
    }

    async fn update(&self, id: SlotId, details: SlotDetails) -> Result<()> {
        let mut slots = self.slots.write().await;
        let slot = slots.get_mut(&id).ok_or_else(|| eyre!("Slot {} not found", id))?;
        slot.details = details;

        tracing::debug!("Slot updated: id={}", id);
        Ok(())
    }

    async fn delete(&self, id: SlotId) -> Result<()> {
        self.slots
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| eyre!("Slot {} not found", id))?;

        tracing::debug!("Slot deleted: id={}", id);
        Ok(())
    }
}
