use serde::Serialize;

use crate::group::model::{Group, UNNAMED};
use crate::json;
use crate::user;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Group,
    Activity,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub name: String,
    pub avatar: String,
    pub time: String,
    pub content: String,
    /// No read state is kept.
    pub unread: bool,
    pub action_url: String,
    pub created_at: String,
}

/// Builds the feed for `user` out of the groups they belong to.
/// Nothing is persisted; the feed is rebuilt on every call.
pub fn synthesize(user: &user::Id, groups: Vec<Group>) -> Vec<Notification> {
    let mut feed = Vec::with_capacity(groups.len() + 1);

    for g in groups {
        let name = g.project_name.clone().unwrap_or_else(|| UNNAMED.to_owned());
        let created_at = json::timestamp(g.created_at);
        let action_url = format!("mainpage.html#group-{}", g.id);

        feed.push(Notification {
            id: format!("group-{}", g.id),
            kind: Kind::Group,
            avatar: avatar(&name),
            time: created_at.clone(),
            content: format!("You joined the group '{name}'. Start collaborating!"),
            unread: true,
            action_url: action_url.clone(),
            created_at: created_at.clone(),
            name: name.clone(),
        });

        let members = g.members.len();
        if g.is_creator(user) && members > 1 {
            feed.push(Notification {
                id: format!("member-{}", g.id),
                kind: Kind::Activity,
                name: "New Member Alert".into(),
                avatar: "👥".into(),
                time: created_at.clone(),
                content: format!("Your group '{name}' now has {members} members!"),
                unread: true,
                action_url,
                created_at,
            });
        }
    }

    let now = json::now();
    feed.push(Notification {
        id: "system-qa-update".into(),
        kind: Kind::Activity,
        name: "Platform Update".into(),
        avatar: "🎉".into(),
        time: now.clone(),
        content: "New Q&A features are now live! Try asking your first question.".into(),
        unread: true,
        action_url: "qa.html".into(),
        created_at: now,
    });

    feed
}

fn avatar(name: &str) -> String {
    if name.is_empty() {
        return "UG".into();
    }
    name.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::group::model::NewGroup;

    fn group(name: &str, creator: &str, members: &[&str]) -> Group {
        let mut g = Group::new(NewGroup {
            creator: Some(user::Id::from(creator)),
            project_name: name.into(),
            description_objective: String::new(),
            preferred_team_size: None,
            required_skills: vec![],
            project_timeline: String::new(),
        });
        g.members = members.iter().map(|m| user::Id::from(*m)).collect();
        g
    }

    #[test]
    fn should_always_end_with_platform_update() {
        let feed = synthesize(&user::Id::from("valera"), vec![]);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "system-qa-update");
        assert_eq!(feed[0].action_url, "qa.html");
    }

    #[test]
    fn should_alert_creator_about_new_members() {
        let valera = user::Id::from("valera");
        let feed = synthesize(
            &valera,
            vec![
                group("huddle", "valera", &["valera", "igor", "radu"]),
                group("solo", "valera", &["valera"]),
                group("other", "igor", &["igor", "valera"]),
            ],
        );

        let ids: Vec<_> = feed.iter().map(|n| n.id.split('-').next().unwrap()).collect();
        assert_eq!(ids, vec!["group", "member", "group", "group", "system"]);

        assert_eq!(feed[0].avatar, "HU");
        assert_eq!(feed[1].kind, Kind::Activity);
        assert_eq!(feed[1].content, "Your group 'huddle' now has 3 members!");
        assert!(feed.iter().all(|n| n.unread));
    }

    #[test]
    fn should_serialize_kind_as_type() {
        let feed = synthesize(&user::Id::from("valera"), vec![group("x", "igor", &["valera"])]);
        let json = serde_json::to_value(&feed[0]).unwrap();

        assert_eq!(json["type"], "group");
        assert_eq!(json["actionUrl"], format!("mainpage.html#{}", feed[0].id));
        assert_eq!(json["avatar"], "X");
    }

    #[test]
    fn should_fall_back_to_initials_placeholder() {
        assert_eq!(avatar(""), "UG");
        assert_eq!(avatar("éclair"), "ÉC");
    }
}
