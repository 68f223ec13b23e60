use std::sync::LazyLock;

use mongodb::bson::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Id;
use crate::json;
use crate::user;

pub const UNNAMED: &str = "Unnamed Group";

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Group {
    #[serde(rename = "_id", with = "crate::json::object_id")]
    pub id: Id,
    #[serde(default, deserialize_with = "json::lenient")]
    pub creatoruserid: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description_objective: String,
    /// Legacy free text such as "4 members".
    #[serde(default, deserialize_with = "json::lenient")]
    pub preferred_team_size: Option<String>,
    /// Typed capacity, parsed once when the group is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u32>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub project_timeline: String,
    #[serde(default, deserialize_with = "json::lenient_list")]
    pub members: Vec<user::Id>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime>,
}

impl Group {
    pub fn new(g: NewGroup) -> Self {
        let members = g.creator.iter().cloned().collect();
        let max_members = g.preferred_team_size.as_deref().and_then(parse_team_size);

        Self {
            id: Id::random(),
            creatoruserid: g.creator.map(|c| c.0),
            project_name: Some(g.project_name),
            description_objective: g.description_objective,
            preferred_team_size: g.preferred_team_size,
            max_members,
            required_skills: g.required_skills,
            project_timeline: g.project_timeline,
            members,
            created_at: Some(DateTime::now()),
        }
    }

    /// Stored capacity, or the one recoverable from the legacy text field.
    pub fn max_members(&self) -> Option<u32> {
        self.max_members.or_else(|| {
            self.preferred_team_size
                .as_deref()
                .and_then(parse_team_size)
        })
    }

    pub fn is_full(&self) -> bool {
        self.max_members()
            .is_some_and(|max| max > 0 && self.members.len() >= max as usize)
    }

    pub fn is_member(&self, user: &user::Id) -> bool {
        self.members.contains(user)
    }

    pub fn is_creator(&self, user: &user::Id) -> bool {
        self.creatoruserid.as_deref() == Some(user.as_str())
    }

    pub fn display_name(&self) -> &str {
        match self.project_name.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => UNNAMED,
        }
    }
}

/// First run of digits in the text; otherwise the whole text as a number.
pub fn parse_team_size(raw: &str) -> Option<u32> {
    match DIGITS.find(raw) {
        Some(m) => m.as_str().parse().ok(),
        None => raw.trim().parse().ok(),
    }
}

#[derive(Clone, Debug)]
pub struct NewGroup {
    pub creator: Option<user::Id>,
    pub project_name: String,
    pub description_objective: String,
    pub preferred_team_size: Option<String>,
    pub required_skills: Vec<String>,
    pub project_timeline: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct GroupDto {
    #[serde(rename = "groupId")]
    pub id: Id,
    pub creatoruserid: Option<String>,
    pub members: Vec<user::Id>,
    #[serde(rename = "memberCount")]
    pub member_count: usize,
    #[serde(rename = "maxMembers")]
    pub max_members: Option<u32>,
    #[serde(rename = "isFull")]
    pub is_full: bool,
    #[serde(rename = "isMember")]
    pub is_member: bool,
    pub preferredteamsize: Option<String>,
    pub projectname: String,
    pub descriptionobjective: String,
    pub projecttimeline: String,
    pub requiredskills: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl GroupDto {
    pub fn new(g: Group, viewer: Option<&user::Id>) -> Self {
        Self {
            member_count: g.members.len(),
            max_members: g.max_members(),
            is_full: g.is_full(),
            is_member: viewer.is_some_and(|v| g.is_member(v)),
            projectname: g.display_name().to_owned(),
            id: g.id,
            creatoruserid: g.creatoruserid,
            members: g.members,
            preferredteamsize: g.preferred_team_size,
            descriptionobjective: g.description_objective,
            projecttimeline: g.project_timeline,
            requiredskills: g.required_skills,
            created_at: json::timestamp(g.created_at),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroupDto {
    pub group_id: Id,
    pub group_name: String,
}

impl From<Group> for MemberGroupDto {
    fn from(g: Group) -> Self {
        Self {
            group_name: g.project_name.unwrap_or_else(|| UNNAMED.to_owned()),
            group_id: g.id,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn group(team_size: &str, members: usize) -> Group {
        let mut g = Group::new(NewGroup {
            creator: Some(user::Id::from("u0")),
            project_name: "Huddle".into(),
            description_objective: String::new(),
            preferred_team_size: Some(team_size.into()),
            required_skills: vec![],
            project_timeline: String::new(),
        });
        g.members = (0..members).map(|i| user::Id(format!("u{i}"))).collect();
        g
    }

    #[test]
    fn should_read_legacy_non_string_members() {
        let stored = mongodb::bson::doc! {
            "_id": mongodb::bson::oid::ObjectId::new(),
            "project_name": "Legacy",
            "members": ["u1", 7_i32, 8_i64],
        };
        let g: Group = mongodb::bson::from_document(stored).unwrap();

        assert_eq!(
            g.members,
            vec![user::Id::from("u1"), user::Id::from("7"), user::Id::from("8")]
        );
        assert!(g.is_member(&user::Id::from("7")));
    }

    #[test]
    fn should_parse_first_digit_run() {
        assert_eq!(parse_team_size("4 members"), Some(4));
        assert_eq!(parse_team_size("between 3 and 5"), Some(3));
        assert_eq!(parse_team_size("team of12"), Some(12));
        assert_eq!(parse_team_size("six"), None);
        assert_eq!(parse_team_size(""), None);
    }

    #[test]
    fn should_be_full_at_capacity() {
        assert!(group("4 members", 4).is_full());
        assert!(group("4 members", 5).is_full());
        assert!(!group("4 members", 3).is_full());
    }

    #[test]
    fn should_never_be_full_without_capacity() {
        let g = group("", 10);
        assert_eq!(g.max_members(), None);
        assert!(!g.is_full());

        assert!(!group("0", 3).is_full());
    }

    #[test]
    fn should_fall_back_to_legacy_team_size() {
        let mut g = group("5 people", 1);
        g.max_members = None;
        assert_eq!(g.max_members(), Some(5));
    }

    #[test]
    fn should_seed_creator_as_only_member() {
        let g = group("3", 1);
        assert_eq!(g.members, vec![user::Id::from("u0")]);
        assert!(g.is_creator(&user::Id::from("u0")));
        assert_eq!(g.max_members, Some(3));
    }

    #[test]
    fn should_map_dto_for_viewer() {
        let dto = GroupDto::new(group("4 members", 4), Some(&user::Id::from("u2")));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["memberCount"], 4);
        assert_eq!(json["maxMembers"], 4);
        assert_eq!(json["isFull"], true);
        assert_eq!(json["isMember"], true);
        assert_eq!(json["projectname"], "Huddle");

        let dto = GroupDto::new(group("", 1), None);
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["maxMembers"].is_null());
        assert_eq!(json["isMember"], false);
    }

    #[test]
    fn should_label_blank_project_name() {
        let mut g = group("4", 1);
        g.project_name = Some("   ".into());
        assert_eq!(g.display_name(), UNNAMED);

        g.project_name = None;
        assert_eq!(MemberGroupDto::from(g).group_name, UNNAMED);
    }

    #[test]
    fn should_read_numeric_legacy_team_size() {
        let doc = mongodb::bson::doc! {
            "_id": mongodb::bson::oid::ObjectId::new(),
            "project_name": "Legacy",
            "preferred_team_size": 6,
            "members": ["a", "b"],
        };

        let g: Group = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(g.preferred_team_size.as_deref(), Some("6"));
        assert_eq!(g.max_members(), Some(6));
    }
}
