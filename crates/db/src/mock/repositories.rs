use async_trait::async_trait;
use mockall::mock;
use tutorgrid_core::models::{ScheduleSlot, SlotDetails, SlotId, Student, StudentId, Teacher, TeacherId};
use tutorgrid_core::store::{Directory, SlotStore};

// Mock stores for testing
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn list_all(&self) -> eyre::Result<Vec<ScheduleSlot>>;

        async fn get(&self, id: SlotId) -> eyre::Result<Option<ScheduleSlot>>;

        async fn create(&self, details: SlotDetails) -> eyre::Result<ScheduleSlot>;

        async fn update(&self, id: SlotId, details: SlotDetails) -> eyre::Result<()>;

        async fn delete(&self, id: SlotId) -> eyre::Result<()>;
    }
}

mock! {
    pub Directory {}

    #[async_trait]
    impl Directory for Directory {
        async fn teacher(&self, id: TeacherId) -> eyre::Result<Option<Teacher>>;

        async fn student(&self, id: StudentId) -> eyre::Result<Option<Student>>;

        async fn teachers(&self) -> eyre::Result<Vec<Teacher>>;

        async fn students(&self) -> eyre::Result<Vec<Student>>;
    }
}
