use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{StudentId, TeacherId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "assigned_students")]
    pub assigned_student_ids: BTreeSet<StudentId>,
}

impl Teacher {
    pub fn teaches(&self, student_id: &StudentId) -> bool {
        self.assigned_student_ids.contains(student_id)
    }

    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Unnamed Teacher ({})", self.id)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(default)]
    pub name: String,
}

impl Student {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Unnamed Student ({})", self.id)
        } else {
            self.name.clone()
        }
    }
}
