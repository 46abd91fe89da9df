//! Partitioning of a day's activities into ordered display groups.

use crate::format::title_case;
use crate::itinerary::{Activity, CANONICAL_PERIODS};

/// Activities of one period, in their original order.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityGroup<'a> {
    key: String,
    label: String,
    activities: Vec<&'a Activity>,
}

impl<'a> ActivityGroup<'a> {
    fn new(key: String) -> Self {
        let label = title_case(&key);
        Self {
            key,
            label,
            activities: Vec::new(),
        }
    }

    /// Lower-cased period key shared by every activity in the group.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display label, e.g. `Morning`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the group is one of morning, afternoon or evening.
    pub fn is_canonical(&self) -> bool {
        CANONICAL_PERIODS.contains(&self.key.as_str())
    }

    /// Member activities in input order.
    pub fn activities(&self) -> &[&'a Activity] {
        &self.activities
    }
}

/// Groups activities by lower-cased period.
///
/// Non-empty canonical groups come first in morning, afternoon, evening
/// order.  Every other period follows in the order it first appears in
/// `activities`, so the result is reproducible for a given input.
pub fn group_activities(activities: &[Activity]) -> Vec<ActivityGroup<'_>> {
    let mut canonical: Vec<ActivityGroup<'_>> = CANONICAL_PERIODS
        .iter()
        .map(|period| ActivityGroup::new((*period).to_owned()))
        .collect();
    let mut extensions: Vec<ActivityGroup<'_>> = Vec::new();

    for activity in activities {
        let key = activity.period_key();
        if let Some(index) = CANONICAL_PERIODS.iter().position(|period| *period == key) {
            canonical[index].activities.push(activity);
            continue;
        }

        match extensions.iter_mut().find(|group| group.key == key) {
            Some(group) => group.activities.push(activity),
            None => {
                let mut group = ActivityGroup::new(key);
                group.activities.push(activity);
                extensions.push(group);
            }
        }
    }

    canonical
        .into_iter()
        .filter(|group| !group.activities.is_empty())
        .chain(extensions)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(period: &str, title: &str) -> Activity {
        Activity {
            period: period.into(),
            title: title.into(),
            ..Activity::default()
        }
    }

    fn keys(groups: &[ActivityGroup<'_>]) -> Vec<String> {
        groups.iter().map(|group| group.key().to_owned()).collect()
    }

    #[test]
    fn canonical_groups_follow_fixed_order() {
        let activities = vec![
            activity("Evening", "Dinner"),
            activity("morning", "Hike"),
            activity("AFTERNOON", "Museum"),
        ];
        let groups = group_activities(&activities);
        assert_eq!(keys(&groups), vec!["morning", "afternoon", "evening"]);
        assert_eq!(groups[0].label(), "Morning");
        assert!(groups.iter().all(ActivityGroup::is_canonical));
    }

    #[test]
    fn empty_canonical_groups_are_skipped() {
        let activities = vec![activity("evening", "Show")];
        let groups = group_activities(&activities);
        assert_eq!(keys(&groups), vec!["evening"]);
    }

    #[test]
    fn members_keep_input_order() {
        let activities = vec![
            activity("morning", "First"),
            activity("evening", "Later"),
            activity("Morning", "Second"),
        ];
        let groups = group_activities(&activities);
        let titles: Vec<&str> = groups[0]
            .activities()
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn extension_groups_follow_first_encounter_order() {
        let activities = vec![
            activity("late night", "Club"),
            activity("morning", "Yoga"),
            activity("Brunch", "Eggs"),
            activity("LATE NIGHT", "Stargazing"),
        ];
        let groups = group_activities(&activities);
        assert_eq!(keys(&groups), vec!["morning", "late night", "brunch"]);
        assert_eq!(groups[1].label(), "Late night");
        assert_eq!(groups[1].activities().len(), 2);
        assert_eq!(groups[2].label(), "Brunch");
        assert!(!groups[2].is_canonical());
    }

    #[test]
    fn empty_period_becomes_its_own_group() {
        let activities = vec![activity("", "Free time")];
        let groups = group_activities(&activities);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key(), "");
        assert_eq!(groups[0].label(), "");
    }

    #[test]
    fn no_activities_yield_no_groups() {
        assert!(group_activities(&[]).is_empty());
    }
}
