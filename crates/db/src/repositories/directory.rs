use async_trait::async_trait;
use eyre::Result;
use std::collections::BTreeMap;
use tutorgrid_core::models::{Student, StudentId, Teacher, TeacherId};
use tutorgrid_core::store::Directory;

/// Read-only teacher and student lookup loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    teachers: BTreeMap<TeacherId, Teacher>,
    students: BTreeMap<StudentId, Student>,
}

impl InMemoryDirectory {
    pub fn new(teachers: impl IntoIterator<Item = Teacher>, students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            teachers: teachers.into_iter().map(|t| (t.id.clone(), t)).collect(),
            students: students.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.students.is_empty()
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn teacher(&self, id: TeacherId) -> Result<Option<Teacher>> {
        Ok(self.teachers.get(&id).cloned())
    }

    async fn student(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self.students.get(&id).cloned())
    }

    async fn teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.values().cloned().collect())
    }

    async fn students(&self) -> Result<Vec<Student>> {
        Ok(self.students.values().cloned().collect())
    }
}
