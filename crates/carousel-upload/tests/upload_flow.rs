use serde_json::json;

use carousel_core::{CarouselError, CarouselModel, EntryState};
use carousel_messages::{MessageKey, NotificationStyle};
use carousel_upload::{
    begin_upload, resolve_upload, CarouselConfig, TransportError, UploadResolution,
    UploadResponse, UploadSource,
};

fn config() -> CarouselConfig {
    serde_json::from_value(json!({
        "endpoints": {"byFile": "https://cdn.test/upload", "byUrl": "https://cdn.test/fetch"},
        "additionalRequestData": {"album": "summer"},
        "additionalRequestHeaders": {"x-token": "abc"},
        "field": "photo"
    }))
    .unwrap()
}

fn png() -> UploadSource {
    UploadSource::File {
        name: "a.png".to_string(),
        mime: "image/png".to_string(),
    }
}

fn response(v: serde_json::Value) -> UploadResponse {
    serde_json::from_value(v).unwrap()
}

#[test]
fn begin_builds_request_and_appends_placeholder() {
    let mut model = CarouselModel::new();

    let pending = begin_upload(&mut model, &config(), png()).unwrap();

    assert_eq!(model.len(), 1);
    assert_eq!(model.state(pending.handle), EntryState::Pending);
    assert_eq!(pending.request.endpoint, "https://cdn.test/upload");
    assert_eq!(pending.request.field, "photo");
    assert_eq!(pending.request.data["album"], json!("summer"));
    assert_eq!(pending.request.headers["x-token"], "abc");
}

#[test]
fn url_source_uses_by_url_endpoint() {
    let mut model = CarouselModel::new();

    let pending = begin_upload(
        &mut model,
        &config(),
        UploadSource::Url {
            url: "https://elsewhere/pic.jpg".to_string(),
        },
    )
    .unwrap();

    assert_eq!(pending.request.endpoint, "https://cdn.test/fetch");
    assert_eq!(pending.request.field, "url");
}

#[test]
fn rejected_source_appends_nothing() {
    let mut model = CarouselModel::new();
    let video = UploadSource::File {
        name: "clip.mp4".to_string(),
        mime: "video/mp4".to_string(),
    };

    let err = begin_upload(&mut model, &config(), video).unwrap_err();

    assert!(matches!(err, CarouselError::UploadFailed(_)));
    assert!(model.is_empty());

    let no_endpoint = begin_upload(&mut model, &CarouselConfig::default(), png()).unwrap_err();
    assert_eq!(
        no_endpoint,
        CarouselError::UploadFailed("no 'byFile' endpoint configured".to_string())
    );
    assert!(model.is_empty());
}

#[test]
fn successful_response_completes_placeholder() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();

    let res = resolve_upload(
        &mut model,
        pending.handle,
        Ok(response(json!({
            "success": 1,
            "file": {"url": "https://cdn.test/a.png", "width": 800, "key": "k/a.png"}
        }))),
    );

    assert_eq!(res, UploadResolution::Completed(pending.handle));
    assert_eq!(
        serde_json::to_value(model.serialize()).unwrap(),
        json!([{"url": "https://cdn.test/a.png", "caption": "", "width": 800, "key": "k/a.png"}])
    );
}

#[test]
fn response_without_url_fails_and_leaves_placeholder() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();

    let res = resolve_upload(
        &mut model,
        pending.handle,
        Ok(response(json!({"success": true, "file": {"width": 1}}))),
    );

    let n = res.notification().unwrap();
    assert_eq!(n.key, MessageKey::UploadFailed);
    assert_eq!(n.style, NotificationStyle::Error);
    match res {
        UploadResolution::Failed { reason, .. } => {
            assert!(reason.starts_with("incorrect response: "), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(model.state(pending.handle), EntryState::Pending);
    assert!(model.serialize().is_empty());
}

#[test]
fn unsuccessful_flag_is_a_failure() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();

    let res = resolve_upload(
        &mut model,
        pending.handle,
        Ok(response(json!({"success": 0, "file": {"url": "x"}}))),
    );

    assert!(res.notification().is_some());
    assert_eq!(model.state(pending.handle), EntryState::Pending);
}

#[test]
fn transport_error_notifies() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();

    let res = resolve_upload(&mut model, pending.handle, Err(TransportError::from("timeout")));

    match res {
        UploadResolution::Failed { reason, handle, .. } => {
            assert_eq!(reason, "timeout");
            assert_eq!(handle, pending.handle);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(model.len(), 1);
}

#[test]
fn late_success_for_removed_entry_is_stale() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();
    model.remove(pending.handle).unwrap();

    let res = resolve_upload(
        &mut model,
        pending.handle,
        Ok(response(json!({"success": 1, "file": {"url": "late"}}))),
    );

    assert_eq!(res, UploadResolution::Stale(pending.handle));
    assert!(res.notification().is_none());
    assert!(model.is_empty());
}

#[test]
fn concurrent_uploads_resolve_out_of_order() {
    let mut model = CarouselModel::new();
    let first = begin_upload(&mut model, &config(), png()).unwrap();
    let second = begin_upload(&mut model, &config(), png()).unwrap();
    model.move_left(second.handle).unwrap();

    resolve_upload(
        &mut model,
        second.handle,
        Ok(response(json!({"success": 1, "file": {"url": "two"}}))),
    );
    resolve_upload(
        &mut model,
        first.handle,
        Ok(response(json!({"success": 1, "file": {"url": "one"}}))),
    );

    let urls: Vec<String> = model.serialize().into_iter().map(|e| e.url).collect();
    assert_eq!(urls, vec!["two", "one"]);
}

#[test]
fn late_failure_for_removed_entry_is_silent() {
    let mut model = CarouselModel::new();
    let pending = begin_upload(&mut model, &config(), png()).unwrap();
    model.remove(pending.handle).unwrap();

    let transport = resolve_upload(&mut model, pending.handle, Err(TransportError::from("timeout")));
    let no_url = resolve_upload(
        &mut model,
        pending.handle,
        Ok(response(json!({"success": true, "file": {}}))),
    );

    assert_eq!(transport, UploadResolution::Stale(pending.handle));
    assert_eq!(no_url, UploadResolution::Stale(pending.handle));
    assert!(transport.notification().is_none());
    assert!(no_url.notification().is_none());
    assert!(model.is_empty());
}
