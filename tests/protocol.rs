mod common;

use common::{FakeBackend, serve};
use serde_json::{Value, json};

fn parsed(lines: &[String]) -> Vec<Value> {
    lines
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn handshake_comes_first_even_without_input() {
    let lines = serve(&FakeBackend::default(), "").await;
    assert_eq!(lines, vec![r#"{"status":"ready"}"#]);
}

#[tokio::test]
async fn end_to_end_conversation() {
    let backend = FakeBackend::default();
    let input = concat!(
        r#"{"command":"ping"}"#,
        "\n",
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"bye"}"#,
        "\n",
    );

    let lines = serve(&backend, input).await;

    assert_eq!(
        lines,
        vec![
            r#"{"status":"ready"}"#,
            r#"{"status":"success","command":"ping","message":"pong"}"#,
            r#"{"status":"success","command":"set_weather","location":"Paris"}"#,
            r#"{"status":"success","command":"query","response":"Bye. Have a nice day.","is_bye":true}"#,
        ]
    );
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn survives_consecutive_malformed_lines() {
    let input = "not json\n{\"command\":\n\n[1,2,3]\n42\n{\"command\":\"ping\"}\n";
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    assert_eq!(responses.len(), 7);
    for response in &responses[1..6] {
        assert_eq!(response["status"], "error");
    }
    assert!(
        responses[1]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON: ")
    );
    assert_eq!(responses[4]["message"], "Request must be a JSON object");
    assert_eq!(
        responses[6],
        json!({"status":"success","command":"ping","message":"pong"})
    );
}

#[tokio::test]
async fn query_before_set_weather_is_an_error() {
    let responses = parsed(
        &serve(
            &FakeBackend::default(),
            "{\"command\":\"query\",\"prompt\":\"Will it rain?\"}\n",
        )
        .await,
    );

    assert_eq!(
        responses[1],
        json!({
            "status": "error",
            "command": "query",
            "message": "No location set. Please set location first."
        })
    );
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":""}"#,
        "\n",
        r#"{"command":"query"}"#,
        "\n",
    );
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    let expected = json!({"status":"error","command":"query","message":"No prompt provided"});
    assert_eq!(responses[2], expected);
    assert_eq!(responses[3], expected);
}

#[tokio::test]
async fn farewell_wins_even_when_backend_is_down() {
    let backend = FakeBackend::replying(&[Err("down"), Err("down")]);
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"Thanks, BYE for now"}"#,
        "\n",
    );
    let responses = parsed(&serve(&backend, input).await);

    assert_eq!(responses[2]["is_bye"], true);
    assert_eq!(responses[2]["response"], "Bye. Have a nice day.");
}

#[tokio::test]
async fn backend_outage_yields_apology_not_error() {
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"Do I need an umbrella?"}"#,
        "\n",
    );
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    assert_eq!(responses[2]["status"], "success");
    assert_eq!(responses[2]["is_bye"], false);
    assert_eq!(
        responses[2]["response"],
        "Sorry, I encountered an error: Network error: backend unreachable"
    );
}

#[tokio::test]
async fn answers_come_back_in_request_order() {
    let backend = FakeBackend::replying(&[Ok("0"), Ok("No rain today."), Ok("0"), Ok("About 20 degrees.")]);
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"Rain?"}"#,
        "\n",
        r#"{"command":"ping"}"#,
        "\n",
        r#"{"command":"query","prompt":"Temperature?"}"#,
        "\n",
    );
    let responses = parsed(&serve(&backend, input).await);

    assert_eq!(responses.len(), 5);
    assert_eq!(responses[1]["command"], "set_weather");
    assert_eq!(responses[2]["response"], "No rain today.");
    assert_eq!(responses[3]["command"], "ping");
    assert_eq!(responses[4]["response"], "About 20 degrees.");
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn replayed_set_weather_converges() {
    let set = r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#;
    let query = r#"{"command":"query","prompt":"Warm?"}"#;

    let once = FakeBackend::replying(&[Ok("0"), Ok("Yes, 20 degrees.")]);
    let once_lines = serve(&once, &format!("{set}\n{query}\n")).await;

    let many = FakeBackend::replying(&[Ok("0"), Ok("Yes, 20 degrees.")]);
    let many_lines = serve(&many, &format!("{set}\n{set}\n{set}\n{query}\n")).await;

    assert_eq!(once_lines.last(), many_lines.last());
}

#[tokio::test]
async fn later_set_weather_replaces_location() {
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"set_weather","location":"Oslo"}"#,
        "\n",
        r#"{"command":"query","prompt":"Cold?"}"#,
        "\n",
    );
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    assert_eq!(responses[2]["location"], "Oslo");
    assert_eq!(
        responses[3]["message"],
        "No location set. Please set location first."
    );
}

#[tokio::test]
async fn unknown_command_keeps_the_loop_alive() {
    let input = "{\"command\":\"forecast\"}\n{\"command\":\"ping\"}\n";
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    assert_eq!(
        responses[1],
        json!({"status":"error","message":"Unknown command: forecast"})
    );
    assert_eq!(responses[2]["message"], "pong");
}

#[tokio::test]
async fn non_string_location_is_stored_as_text() {
    let input = concat!(
        r#"{"command":"set_weather","location":42,"weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"bye"}"#,
        "\n",
    );
    let responses = parsed(&serve(&FakeBackend::default(), input).await);

    assert_eq!(
        responses[1],
        json!({"status":"success","command":"set_weather","location":"42"})
    );
    assert_eq!(responses[2]["status"], "success");
    assert_eq!(responses[2]["is_bye"], true);
}

#[tokio::test]
async fn backend_panic_is_isolated_to_its_request() {
    let input = concat!(
        r#"{"command":"set_weather","location":"Paris","weather_data":{"temp":20}}"#,
        "\n",
        r#"{"command":"query","prompt":"Rain?"}"#,
        "\n",
        r#"{"command":"ping"}"#,
        "\n",
    );
    let responses = parsed(&serve(&FakeBackend::panicking(), input).await);

    assert_eq!(responses.len(), 4);
    assert_eq!(
        responses[2],
        json!({"status":"error","message":"Service error: backend exploded"})
    );
    assert_eq!(
        responses[3],
        json!({"status":"success","command":"ping","message":"pong"})
    );
}
