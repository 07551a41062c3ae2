use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of day slots in a complete plan.
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Fixed calendar order used for plan slots.
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid weekday '{}'. Valid options: Mon, Tue, Wed, Thu, Fri, Sat, Sun",
                    s
                )
            })
    }
}

/// One slot of a week plan. `meal_id` is a weak reference: the meal may
/// have been deleted since the plan was generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAssignment {
    pub label: Weekday,
    pub meal_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekPlan {
    pub days: Vec<DayAssignment>,
}

impl WeekPlan {
    /// Assigns the fixed labels positionally. Extra ids are ignored.
    pub fn from_meal_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let days = Weekday::ALL
            .into_iter()
            .zip(ids)
            .map(|(label, id)| DayAssignment {
                label,
                meal_id: id.into(),
            })
            .collect();
        Self { days }
    }

    /// A plan with anything other than seven days counts as no plan.
    pub fn is_complete(&self) -> bool {
        self.days.len() == DAYS_PER_WEEK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_display() {
        assert_eq!(format!("{}", Weekday::Mon), "Mon");
        assert_eq!(format!("{}", Weekday::Sun), "Sun");
    }

    #[test]
    fn test_weekday_from_str() {
        assert_eq!(Weekday::from_str("wed").unwrap(), Weekday::Wed);
        assert_eq!(Weekday::from_str("FRI").unwrap(), Weekday::Fri);
        assert!(Weekday::from_str("Funday").is_err());
        assert!(Weekday::from_str("").is_err());
    }

    #[test]
    fn test_weekday_json() {
        let json = serde_json::to_string(&Weekday::Thu).unwrap();
        assert_eq!(json, "\"Thu\"");
    }

    #[test]
    fn test_from_meal_ids_labels_in_order() {
        let plan = WeekPlan::from_meal_ids(["a", "b", "c", "d", "e", "f", "g"]);
        assert!(plan.is_complete());
        let labels: Vec<Weekday> = plan.days.iter().map(|d| d.label).collect();
        assert_eq!(labels, Weekday::ALL.to_vec());
        assert_eq!(plan.days[6].meal_id, "g");
    }

    #[test]
    fn test_short_plan_is_incomplete() {
        let plan = WeekPlan::from_meal_ids(["a", "b"]);
        assert_eq!(plan.days.len(), 2);
        assert!(!plan.is_complete());
    }

    #[test]
    fn test_day_assignment_json_is_camel_case() {
        let day = DayAssignment {
            label: Weekday::Mon,
            meal_id: "m1".to_string(),
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json, serde_json::json!({"label": "Mon", "mealId": "m1"}));
    }
}
