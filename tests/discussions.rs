mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Fakes, get, post};
use huddle::group::model::{Group, NewGroup};
use huddle::user;

fn seed_group(fakes: &Fakes, members: &[&str]) -> Group {
    let mut g = Group::new(NewGroup {
        creator: Some(user::Id::from(members[0])),
        project_name: "Compilers".into(),
        description_objective: String::new(),
        preferred_team_size: Some("4".into()),
        required_skills: vec![],
        project_timeline: String::new(),
    });
    g.members = members.iter().map(|m| user::Id::from(*m)).collect();
    fakes.groups.push(g.clone());
    g
}

#[tokio::test]
async fn should_create_discussion_only_for_members() {
    let fakes = Fakes::new();
    let g = seed_group(&fakes, &["valera", "igor"]);
    let app = fakes.app();

    let (status, body) = post(
        &app,
        "/creatediscussion",
        json!({ "roomName": "standup", "groupId": g.id, "userId": "radu" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You are not a member of this group");
    assert!(fakes.discussions.all().is_empty());

    let (status, body) = post(
        &app,
        "/creatediscussion",
        json!({ "roomName": "standup", "groupId": "65f000000000000000000000", "userId": "valera" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Group not found");

    let (status, body) = post(&app, "/creatediscussion", json!({ "groupId": g.id, "userId": "valera" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Room name, group ID, and user ID required");

    let (status, body) = post(
        &app,
        "/creatediscussion",
        json!({ "roomName": "standup", "groupId": g.id, "userId": "valera", "topic": "daily" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Discussion created!");

    let stored = fakes.discussions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.0, body["discussionId"].as_str().unwrap());
    assert_eq!(stored[0].group_name, "Compilers");
    assert_eq!(stored[0].participants, vec!["valera".to_string()]);
}

#[tokio::test]
async fn should_exchange_messages_between_members() {
    let fakes = Fakes::new();
    let g = seed_group(&fakes, &["valera", "igor"]);
    let app = fakes.app();

    let (_, body) = post(
        &app,
        "/creatediscussion",
        json!({ "roomName": "standup", "groupId": g.id, "userId": "valera" }),
    )
    .await;
    let id = body["discussionId"].as_str().unwrap().to_owned();

    let (status, body) = post(
        &app,
        "/sendmessage",
        json!({ "discussionId": id, "userId": "radu", "content": "let me in" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
    assert!(fakes.discussions.all()[0].messages.is_empty());

    let (status, _) = post(
        &app,
        "/sendmessage",
        json!({ "discussionId": id, "userId": "igor", "userName": "Igor", "content": "hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = &fakes.discussions.all()[0];
    assert_eq!(stored.last_message, "hello");
    assert_eq!(stored.participants, vec!["valera".to_string(), "igor".to_string()]);

    let (status, body) = get(&app, &format!("/getmessages/{id}?userId=valera")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roomName"], "standup");
    assert_eq!(body["groupName"], "Compilers");
    assert_eq!(body["messages"][0]["content"], "hello");
    assert_eq!(body["messages"][0]["userId"], "igor");

    let (status, _) = get(&app, &format!("/getmessages/{id}?userId=radu")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, &format!("/getmessages/{id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/getmessages/65f000000000000000000000?userId=valera").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Discussion not found");
}

#[tokio::test]
async fn should_list_discussions_of_my_groups() {
    let fakes = Fakes::new();
    let mine = seed_group(&fakes, &["valera"]);
    let theirs = seed_group(&fakes, &["igor"]);
    let app = fakes.app();

    for (g, user) in [(&mine, "valera"), (&theirs, "igor")] {
        post(
            &app,
            "/creatediscussion",
            json!({ "roomName": format!("room of {user}"), "groupId": g.id, "userId": user }),
        )
        .await;
    }

    let (status, body) = get(&app, "/getdiscussions?userId=valera").await;
    assert_eq!(status, StatusCode::OK);
    let discussions = body["discussions"].as_array().unwrap();
    assert_eq!(discussions.len(), 1);
    assert_eq!(discussions[0]["roomName"], "room of valera");
    assert_eq!(discussions[0]["groupId"], mine.id.0);

    let (_, body) = get(&app, "/getdiscussions?userId=radu").await;
    assert!(body["discussions"].as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/getdiscussions?userId=undefined").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID required");
}
