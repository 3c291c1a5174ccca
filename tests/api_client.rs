use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use standsheet::application::dto::{
    ArmorExpenditureRequest, CharacterPayload, HarmRequest, NewProgressClock, ProgressClockTick,
    RollActionRequest,
};
use standsheet::application::ports::outbound::{
    ApiError, CharacterApiPort, ReferenceDataPort, SearchPort,
};
use standsheet::application::services::{
    submission_error_message, CharacterCreationService, CreationTimings,
};
use standsheet::domain::entities::{CharacterDraft, ReferenceData};
use standsheet::domain::services::RollRequest;
use standsheet::domain::value_objects::{
    Action, ArmorUse, BenefitId, CharacterId, ClockSegments, HarmLevel, HeritageId, Playbook,
    RollOutcome, ViceId,
};
use standsheet::infrastructure::api_client::ApiClient;
use standsheet::infrastructure::config::ApiCredentials;
use std::sync::Arc;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        &format!("{}/api", server.uri()),
        ApiCredentials::token("s3cret"),
    )
}

fn draft() -> CharacterDraft {
    let mut draft = CharacterDraft::new();
    draft.playbook = Some(Playbook::Spin);
    draft.true_name = "Gyro Zeppeli".to_string();
    draft.action_dots.set(Action::Bizarre, 2).unwrap();
    draft
}

#[tokio::test]
async fn test_create_character_sends_token_and_backend_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/"))
        .and(header("authorization", "Token s3cret"))
        .and(body_partial_json(json!({
            "playbook": "SPIN",
            "true_name": "Gyro Zeppeli",
            "action_dots": {"attune": 2},
            "alias": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 31, "true_name": "Gyro Zeppeli"})))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server)
        .create_character(&CharacterPayload::from_draft(&draft()))
        .await
        .unwrap();
    assert_eq!(id, CharacterId::new(31));
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "nope"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/characters/"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"vice":["required"]}"#))
        .mount(&server)
        .await;

    let api = client(&server);
    let payload = CharacterPayload::from_draft(&draft());

    let err = api.create_character(&payload).await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(403)));
    assert_eq!(
        submission_error_message(&err),
        "Authentication error. Please log in again."
    );

    let err = api.create_character(&payload).await.unwrap_err();
    assert!(matches!(&err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(
        submission_error_message(&err),
        r#"Error creating character: {"vice":["required"]}"#
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let api = ApiClient::new(&uri, ApiCredentials::anonymous());
    let err = api.get_character(CharacterId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Unavailable(_)));
    assert_eq!(
        submission_error_message(&err),
        "No response from server. Please check your connection."
    );
}

#[tokio::test]
async fn test_fetch_reference_data_reads_all_catalogs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heritages/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{
                "id": 4,
                "name": "Rock Human",
                "base_hp": 6,
                "description": "Silicon-based",
                "benefits": [{"id": 10, "name": "Stone Skin", "hp_cost": 2, "required": true, "description": ""}],
                "detriments": [{"id": 11, "name": "Slow", "hp_value": 1, "required": false, "description": ""}]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Gambling", "description": "Risk"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/abilities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Tough As Nails", "description": "", "type": "standard"}
        ])))
        .mount(&server)
        .await;

    let data = client(&server).fetch_reference_data().await.unwrap();
    assert!(!data.is_fallback);
    let heritage = data.heritage(HeritageId::new(4)).unwrap();
    assert_eq!(heritage.required_benefits(), vec![BenefitId::new(10)]);
    assert_eq!(data.vices.len(), 1);
    assert_eq!(data.abilities[0].ability_type, "standard");
}

#[tokio::test]
async fn test_reference_data_fails_if_any_catalog_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heritages/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vices/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/abilities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client(&server).fetch_reference_data().await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn test_global_search_passes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/global-search/"))
        .and(query_param("q", "johnny joestar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "characters": [{"id": 2, "name": "Johnny Joestar", "type": "character"}],
            "vices": []
        })))
        .mount(&server)
        .await;

    let results = client(&server).global_search("johnny joestar").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "/character/2");
}

#[tokio::test]
async fn test_roll_action_decodes_backend_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/5/roll-action/"))
        .and(body_partial_json(json!({"action": "attune", "dice_count": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action": "attune",
            "rating": 2,
            "dice": [6, 1],
            "highest": 6,
            "position": "controlled",
            "effect": "standard",
            "outcome": "critical success"
        })))
        .mount(&server)
        .await;

    let request = RollRequest::action(Action::Bizarre, 2);
    let response = client(&server)
        .roll_action(CharacterId::new(5), &RollActionRequest::from(&request))
        .await
        .unwrap();
    let outcome = response.to_outcome(&request).unwrap();
    assert_eq!(outcome.result, 6);
    assert_eq!(outcome.outcome, RollOutcome::CriticalSuccess);
}

#[tokio::test]
async fn test_incomplete_session_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (session, _navigation) = CharacterCreationService::new(
        Arc::new(client(&server)),
        Arc::new(ReferenceData::fallback()),
        CreationTimings::default(),
    );
    // The first step is incomplete, so nothing reaches the backend.
    assert!(session.submit().await.is_err());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

fn stored_character(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": 1,
        "stand": null,
        "crew": null,
        "heritage_details": null,
        "vice_details": {"id": 2, "name": "Violence", "description": "Physical conflict"},
        "special_ability_details": null,
        "selected_benefits": [],
        "selected_detriments": [],
        "true_name": name,
        "alias": null,
        "appearance": null,
        "background_note": null,
        "background_note2": null,
        "action_dots": {"skirmish": 2},
        "playbook": "HAMON",
        "stand_type": null,
        "stand_name": null,
        "stand_form": null,
        "stand_conscious": true,
        "coin_stats": {},
        "armor_type": null,
        "close_friend": "",
        "rival": "",
        "vice": 2,
        "loadout": 3,
        "stress": 4,
        "trauma": [],
        "xp_clocks": {},
        "custom_ability_description": null,
        "custom_ability_type": "single_with_3_uses",
        "extra_custom_abilities": null,
        "standard_abilities": []
    })
}

#[tokio::test]
async fn test_get_character_reads_nullable_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/characters/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_character(12, "Joseph Joestar")))
        .mount(&server)
        .await;

    let record = client(&server).get_character(CharacterId::new(12)).await.unwrap();
    assert_eq!(record.vice_name(), Some("Violence"));
    assert_eq!(record.sheet.stress, 4);

    let draft = record.into_draft().unwrap();
    assert_eq!(draft.playbook, Some(Playbook::Hamon));
    assert_eq!(draft.true_name, "Joseph Joestar");
    assert_eq!(draft.action_dots.get(Action::Skirmish), 2);
    assert_eq!(draft.stand.name, "");
}

#[tokio::test]
async fn test_list_characters_reads_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/characters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [stored_character(1, "Jotaro"), stored_character(2, "Polnareff")]
        })))
        .mount(&server)
        .await;

    let records = client(&server).list_characters().await.unwrap();
    let names: Vec<_> = records.iter().map(|r| r.true_name.as_str()).collect();
    assert_eq!(names, vec!["Jotaro", "Polnareff"]);
    assert_eq!(records[1].vice, Some(ViceId::new(2)));
}

#[tokio::test]
async fn test_delete_character_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/characters/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_character(CharacterId::new(4)).await.unwrap();
}

#[tokio::test]
async fn test_harm_and_armor_actions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/6/take-harm/"))
        .and(body_partial_json(json!({"level": "severe", "type": "physical"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Took severe physical harm",
            "harm_level": "severe",
            "harm_type": "physical",
            "description": "Broken arm"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/characters/6/log-armor-expenditure/"))
        .and(body_partial_json(json!({"type": "special", "harm_reduced": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Used special armor to reduce harm by 1",
            "armor_type": "special",
            "harm_reduced": 1
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let id = CharacterId::new(6);
    let harm = api
        .take_harm(id, &HarmRequest::physical(HarmLevel::Severe, "Broken arm"))
        .await
        .unwrap();
    assert_eq!(harm.harm_level, HarmLevel::Severe);
    assert_eq!(harm.description.as_deref(), Some("Broken arm"));

    let armor = api
        .log_armor_expenditure(
            id,
            &ArmorExpenditureRequest {
                armor: ArmorUse::Special,
                harm_reduced: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(armor.armor_type, ArmorUse::Special);
}

#[tokio::test]
async fn test_indulge_vice_without_stress_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/6/indulge-vice/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "No stress to recover"})))
        .mount(&server)
        .await;

    let err = client(&server).indulge_vice(CharacterId::new(6)).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, message } if message.contains("No stress")));
}

#[tokio::test]
async fn test_progress_clock_round() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/characters/6/add-progress-clock/"))
        .and(body_partial_json(json!({"name": "Find the arrow", "segments": 6})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Added progress clock: Find the arrow",
            "name": "Find the arrow",
            "segments": 6,
            "description": ""
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/characters/6/update-progress-clock/"))
        .and(body_partial_json(json!({"name": "Find the arrow", "ticks": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Updated progress clock: Find the arrow",
            "name": "Find the arrow",
            "ticks_added": 2
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let id = CharacterId::new(6);
    let added = api
        .add_progress_clock(
            id,
            &NewProgressClock {
                name: "Find the arrow".to_string(),
                segments: ClockSegments::new(6).unwrap(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(added.clock.segments.value(), 6);

    let ticked = api
        .update_progress_clock(
            id,
            &ProgressClockTick {
                name: "Find the arrow".to_string(),
                ticks: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(ticked.ticks_added, 2);
}
