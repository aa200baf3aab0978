use std::collections::HashMap;
use std::fs;

use async_trait::async_trait;
use dashmap::DashMap;

use maxfit_core::error::{MaxFitError, Result};
use maxfit_core::program::FitnessProgram;

#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// All programs generated for a user, in storage order.
    async fn programs_for(&self, email: &str) -> Result<Vec<FitnessProgram>>;
}

/// In-memory program collection keyed by owner email.
#[derive(Default)]
pub struct MemoryProgramStore {
    by_email: DashMap<String, Vec<FitnessProgram>>,
}

impl MemoryProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "<email>": [program, ...] }` document.
    pub fn from_json(s: &str) -> Result<Self> {
        let map: HashMap<String, Vec<FitnessProgram>> = serde_json::from_str(s)
            .map_err(|e| MaxFitError::BadRequest(format!("invalid programs json: {e}")))?;
        let store = Self::new();
        for (email, programs) in map {
            store.by_email.insert(email, programs);
        }
        Ok(store)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| MaxFitError::Internal(format!("read programs failed: {e}")))?;
        Self::from_json(&s)
    }
}

#[async_trait]
impl ProgramStore for MemoryProgramStore {
    async fn programs_for(&self, email: &str) -> Result<Vec<FitnessProgram>> {
        Ok(self
            .by_email
            .get(email)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_boxed_documents() {
        let store = MemoryProgramStore::from_json(
            r#"{ "a@x.io": [ { "id": "p1", "createdAt": "2025-01-01",
                 "workoutPlan": { "weeklySchedule": [
                   { "day": "Mon", "workoutType": "Strength",
                     "exercises": [ { "name": "Squat", "sets": { "$numberInt": "5" } } ] }
                 ] } } ] }"#,
        )
        .unwrap();
        let ps = store.programs_for("a@x.io").await.unwrap();
        assert_eq!(ps.len(), 1);
        let sets = ps[0].workout_plan.as_ref().unwrap().weekly_schedule[0].exercises[0].sets();
        assert_eq!(sets, 5);
        assert!(store.programs_for("nobody@x.io").await.unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_file() {
        let err = MemoryProgramStore::from_json("[]").err().unwrap();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }
}
