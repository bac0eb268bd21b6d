// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_activity_api::{
    ActivityGateway, BulkDispatcher, ConsoleCapabilities, GatewayError, OperationOutcome,
};
use campus_activity_domain::{ActivityId, ParticipantRole, PictureId, PictureStatus, UserId};
use serde_json::json;
use std::sync::Arc;

use super::helpers::{TOKEN, gateway_for, start_stub};
use crate::{ClientError, HttpGateway, HttpGatewayConfig};

#[test]
fn test_base_url_must_be_http() {
    let err = HttpGateway::new(&HttpGatewayConfig::new("ftp://example.edu", TOKEN)).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn test_token_must_be_a_header_value() {
    let err =
        HttpGateway::new(&HttpGatewayConfig::new("http://localhost", "bad\ntoken")).unwrap_err();
    assert!(matches!(err, ClientError::InvalidToken { .. }));
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let gateway: HttpGateway =
        HttpGateway::new(&HttpGatewayConfig::new(" https://example.edu/api/ ", TOKEN)).unwrap();
    assert_eq!(gateway.base_url(), "https://example.edu/api");
}

#[tokio::test]
async fn test_lists_activities() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let activities = gateway.list_activities_with_participants().await.unwrap();

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].title, "Campus clean-up");
    assert_eq!(activities[0].max_participants, Some(40));
    assert_eq!(activities[1].max_participants, None);
}

#[tokio::test]
async fn test_lists_participants() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let participants = gateway
        .list_participants(ActivityId::new(10))
        .await
        .unwrap();

    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].code, "SV001");
    assert_eq!(participants[0].role, ParticipantRole::Student);
    assert_eq!(participants[1].role, ParticipantRole::Teacher);
    assert_eq!(participants[1].department, None);
    assert!(participants[1].check_in_time.is_some());
}

#[tokio::test]
async fn test_lists_pictures() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let pictures = gateway
        .list_participant_pictures(ActivityId::new(10), UserId::new(4))
        .await
        .unwrap();

    assert_eq!(pictures.len(), 2);
    assert_eq!(pictures[0].picture_id, PictureId::new(400));
    assert_eq!(pictures[0].status, PictureStatus::Pending);
    assert_eq!(pictures[1].status, PictureStatus::Rejected);
    assert_eq!(pictures[1].reject_reason.as_deref(), Some("blurry"));
}

#[tokio::test]
async fn test_missing_activity_is_not_found() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let err = gateway
        .list_participants(ActivityId::new(99))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::NotFound {
            message: String::from("Activity not found")
        }
    );
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, "stale-token");

    let err = gateway
        .list_activities_with_participants()
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_undecodable_body_is_transport() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let err = gateway
        .list_participants(ActivityId::new(13))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Transport { .. }));
}

#[tokio::test]
async fn test_unknown_enum_value_is_transport() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let err = gateway
        .list_participants(ActivityId::new(12))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Transport { ref message } if message.contains("alumni")));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let gateway: HttpGateway =
        HttpGateway::new(&HttpGatewayConfig::new(&format!("http://{addr}"), TOKEN)).unwrap();

    let err = gateway
        .check_in(ActivityId::new(10), UserId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Transport { .. }));
}

#[tokio::test]
async fn test_bulk_approve_sends_camel_case_body() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let result = gateway
        .bulk_approve_pictures(&[PictureId::new(100), PictureId::new(200)], true)
        .await
        .unwrap();

    assert_eq!(result.approved_count, 2);
    assert_eq!(result.skipped_count, 0);
    let certificates = result.certificates.unwrap();
    assert_eq!(certificates[0].user_id, UserId::new(1));
    assert_eq!(certificates[0].certificate_id, "CERT-1");
    assert_eq!(
        stub.log.lock().await.bodies,
        vec![json!({ "pictureIds": [100, 200], "autoGenerateCertificate": true })]
    );
}

#[tokio::test]
async fn test_bulk_reject_surfaces_backend_errors() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    let result = gateway
        .bulk_reject_pictures(&[PictureId::new(4), PictureId::new(5)], "off topic")
        .await
        .unwrap();
    assert_eq!(result.rejected_count, 1);
    assert_eq!(
        result.errors,
        Some(vec![String::from("Picture 5 already moderated")])
    );

    let err = gateway
        .bulk_reject_pictures(&[PictureId::new(4)], "")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Validation {
            message: String::from("reason is required")
        }
    );
}

#[tokio::test]
async fn test_check_out_accepts_json_body_and_classifies_forbidden() {
    let stub = start_stub().await;
    let gateway: HttpGateway = gateway_for(&stub, TOKEN);

    assert!(
        gateway
            .check_out(ActivityId::new(10), UserId::new(1))
            .await
            .is_ok()
    );
    assert!(
        gateway
            .check_out(ActivityId::new(10), UserId::new(9))
            .await
            .unwrap_err()
            .is_unauthorized()
    );
}

#[tokio::test]
async fn test_dispatcher_fans_out_over_http() {
    let stub = start_stub().await;
    let gateway: Arc<HttpGateway> = Arc::new(gateway_for(&stub, TOKEN));
    let dispatcher = BulkDispatcher::new(gateway, ConsoleCapabilities::all());
    let user_ids: Vec<UserId> = [1, 2, 3, 4].into_iter().map(UserId::new).collect();

    let result = dispatcher
        .check_in(Some(ActivityId::new(10)), &user_ids)
        .await
        .unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.fail_count, 2);
    assert_eq!(result.outcome(), OperationOutcome::PartialFailure);
    assert_eq!(
        result.outcomes[1].error,
        Some(GatewayError::Server {
            status: 500,
            message: String::from("database unavailable"),
        })
    );
    assert_eq!(
        result.outcomes[2].error,
        Some(GatewayError::Validation {
            message: String::from("Already checked in"),
        })
    );

    let mut attempted: Vec<i64> = stub.log.lock().await.check_ins.clone();
    attempted.sort_unstable();
    assert_eq!(attempted, vec![1, 2, 3, 4]);
}
