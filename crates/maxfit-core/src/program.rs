//! Generated fitness programs (workout + diet) as stored by the CMS.
//!
//! Documents come from a document database whose driver sometimes boxes
//! integers as `{ "$numberInt": "12" }`. [`BoxedInt`] accepts both forms on
//! the way in and always serializes back as a plain number.

use serde::{Deserialize, Serialize, Serializer};

/// Integer that may arrive boxed by the database driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "BoxedIntRepr")]
pub struct BoxedInt(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum BoxedIntRepr {
    Plain(i64),
    Float(f64),
    Boxed {
        #[serde(rename = "$numberInt")]
        number_int: String,
    },
    Other(serde_json::Value),
}

impl From<BoxedIntRepr> for BoxedInt {
    fn from(r: BoxedIntRepr) -> Self {
        match r {
            BoxedIntRepr::Plain(n) => BoxedInt(n),
            BoxedIntRepr::Float(f) => BoxedInt(f.trunc() as i64),
            BoxedIntRepr::Boxed { number_int } => BoxedInt(leading_int(&number_int)),
            BoxedIntRepr::Other(_) => BoxedInt(0),
        }
    }
}

impl Serialize for BoxedInt {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.0)
    }
}

/// Leading (optionally signed) integer of a string, 0 when there is none.
fn leading_int(s: &str) -> i64 {
    let t = s.trim_start();
    let (sign, digits) = match t.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// All ASCII digits of a string read as one number (`"45-60 min"` -> 4560).
fn digits_only(s: &str) -> i64 {
    let d: String = s.chars().filter(char::is_ascii_digit).collect();
    d.parse().unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<BoxedInt>,
    pub reps: String,
    pub rest_time: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

impl Exercise {
    pub fn sets(&self) -> i64 {
        self.sets.map(|b| b.0).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutDay {
    pub day: String,
    pub workout_type: String,
    pub exercises: Vec<Exercise>,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutPlan {
    pub overview: String,
    pub duration: String,
    pub frequency: String,
    pub weekly_schedule: Vec<WorkoutDay>,
    pub progression_notes: String,
    pub safety_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meal {
    pub meal: String,
    pub calories: BoxedInt,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snack {
    pub snack: String,
    pub calories: BoxedInt,
    pub timing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Snack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MacroBreakdown {
    pub protein: String,
    pub carbohydrates: String,
    pub fats: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietPlan {
    pub overview: String,
    pub calorie_target: String,
    pub macro_breakdown: MacroBreakdown,
    pub meal_plan: MealPlan,
    pub hydration_goal: String,
    pub supplement_recommendations: Vec<String>,
    pub nutrition_tips: Vec<String>,
}

impl DietPlan {
    /// Totals saturate at `i64` bounds; values come straight from stored documents.
    pub fn snack_calories(&self) -> i64 {
        self.meal_plan
            .snacks
            .iter()
            .map(|s| s.calories.0)
            .fold(0, i64::saturating_add)
    }

    pub fn daily_calories(&self) -> i64 {
        let m = &self.meal_plan;
        [m.breakfast.calories.0, m.lunch.calories.0, m.dinner.calories.0]
            .into_iter()
            .fold(self.snack_calories(), i64::saturating_add)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitnessProgram {
    pub id: String,
    pub generated_at: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<WorkoutPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_plan: Option<DietPlan>,
}

/// Coarse workout category derived from a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Strength,
    Cardio,
    Mixed,
}

impl WorkoutKind {
    pub fn classify(schedule: &[WorkoutDay]) -> Self {
        let types: Vec<String> = schedule
            .iter()
            .map(|d| d.workout_type.to_lowercase())
            .collect();
        let strength = types
            .iter()
            .any(|t| t.contains("strength") || t.contains("weight"));
        let cardio = types
            .iter()
            .any(|t| t.contains("cardio") || t.contains("running"));
        match (strength, cardio) {
            (true, false) => WorkoutKind::Strength,
            (false, true) => WorkoutKind::Cardio,
            _ => WorkoutKind::Mixed,
        }
    }
}

/// Listing filter; `All` keeps every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutFilter {
    #[default]
    All,
    Strength,
    Cardio,
    Mixed,
}

impl WorkoutFilter {
    fn accepts(self, kind: WorkoutKind) -> bool {
        match self {
            WorkoutFilter::All => true,
            WorkoutFilter::Strength => kind == WorkoutKind::Strength,
            WorkoutFilter::Cardio => kind == WorkoutKind::Cardio,
            WorkoutFilter::Mixed => kind == WorkoutKind::Mixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_exercises: usize,
    /// Mean per-day duration in minutes, rounded.
    pub avg_duration: i64,
    pub workout_type: WorkoutKind,
}

impl WorkoutStats {
    pub fn of(plan: &WorkoutPlan) -> Self {
        let schedule = &plan.weekly_schedule;
        let total_exercises = schedule.iter().map(|d| d.exercises.len()).sum();
        let avg_duration = if schedule.is_empty() {
            0
        } else {
            let sum = schedule
                .iter()
                .map(|d| digits_only(&d.duration))
                .fold(0, i64::saturating_add);
            (sum as f64 / schedule.len() as f64).round() as i64
        };
        Self {
            total_workouts: schedule.len(),
            total_exercises,
            avg_duration,
            workout_type: WorkoutKind::classify(schedule),
        }
    }
}

/// Programs carrying a workout plan, matching an optional search term and kind filter.
pub fn workout_programs<'a>(
    programs: &'a [FitnessProgram],
    search: Option<&str>,
    filter: WorkoutFilter,
) -> Vec<&'a FitnessProgram> {
    let needle = search.map(str::to_lowercase).unwrap_or_default();
    let mut out: Vec<&FitnessProgram> = programs
        .iter()
        .filter(|p| {
            let Some(plan) = &p.workout_plan else {
                return false;
            };
            let matches = plan.overview.to_lowercase().contains(&needle)
                || plan
                    .weekly_schedule
                    .iter()
                    .any(|d| d.workout_type.to_lowercase().contains(&needle));
            matches && filter.accepts(WorkoutKind::classify(&plan.weekly_schedule))
        })
        .collect();
    newest_first(&mut out);
    out
}

/// Programs carrying a diet plan.
pub fn nutrition_programs(programs: &[FitnessProgram]) -> Vec<&FitnessProgram> {
    let mut out: Vec<&FitnessProgram> = programs.iter().filter(|p| p.diet_plan.is_some()).collect();
    newest_first(&mut out);
    out
}

// createdAt is ISO-8601, so lexical order is chronological.
fn newest_first(v: &mut [&FitnessProgram]) {
    v.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
