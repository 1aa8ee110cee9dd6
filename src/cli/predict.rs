//! Predict command - runs a demo's model against a running gateway

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::Args;
use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::render::{pretty, render_prediction, render_saliency, OutputKind, SaliencyOptions};
use crate::domain::demo::{demo_by_path, is_legacy_permalink, DemoConfig};
use crate::domain::model::{model_card_id, AttackerId, InterpreterId, Model};
use crate::domain::permalink::NewPermalink;
use crate::domain::prediction::ModelAction;
use crate::domain::session::{Action, Input, LoadRequest, Prediction, Session, State};
use crate::domain::viz::DEFAULT_TOP_K;
use crate::domain::DomainError;
use crate::infrastructure::client::DemoClient;

/// Shown for any failed prediction
const PREDICT_FAILED: &str = "Something went wrong.";

/// Arguments for the predict command
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Demo path, e.g. `named-entity-recognition`
    pub demo: String,

    /// Model to run (defaults to the demo's first model)
    #[arg(long)]
    pub model: Option<String>,

    /// Full input as a JSON object
    #[arg(long, conflicts_with = "fields")]
    pub input: Option<String>,

    /// Single input field; the value is parsed as JSON and falls back to a string
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,

    /// Permalink slug whose stored input pre-populates the request
    #[arg(long)]
    pub permalink: Option<String>,

    /// Interpreter to run after predicting
    #[arg(long)]
    pub interpret: Option<InterpreterId>,

    /// Attacker to run after predicting
    #[arg(long)]
    pub attack: Option<AttackerId>,

    /// Store the input as a permalink and print its slug
    #[arg(long)]
    pub share: bool,

    /// Print verb trees for SRL and Open IE output
    #[arg(long)]
    pub tree: bool,

    /// Number of tokens highlighted by saliency output
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Saliency cut-off slider position, 0 to 100
    #[arg(long, default_value_t = 0.0)]
    pub min_weight: f64,

    /// Gateway base URL
    #[arg(long, default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    if key.is_empty() {
        return Err("field name cannot be empty".to_string());
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Text produced by a run, split by stream
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    pub output: Vec<String>,
    pub error: Option<String>,
}

impl Report {
    fn fail(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run the predict command
pub async fn run(args: PredictArgs) -> anyhow::Result<ExitCode> {
    let client = DemoClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    let report = execute(&client, &args).await?;

    for line in &report.output {
        println!("{}", line);
    }

    match report.error {
        Some(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

pub async fn execute(client: &DemoClient, args: &PredictArgs) -> anyhow::Result<Report> {
    if !(0.0..=100.0).contains(&args.min_weight) {
        bail!("--min-weight must be between 0 and 100");
    }

    let demo =
        demo_by_path(&args.demo).ok_or_else(|| anyhow!("Unknown demo: {}", args.demo))?;
    let mut report = Report::default();

    let request = LoadRequest::new(demo.model_ids.iter().map(|id| id.to_string()).collect());
    let request_id = request.id;
    let mut session = Session::new(State::Loading {
        request: request.clone(),
    });

    match load_models(client, &request.model_ids).await {
        Ok(models) => {
            session.dispatch(Action::Loaded {
                request: request_id,
                models,
            })?;
        }
        Err(e) => {
            session.dispatch(Action::LoadError {
                request: request_id,
                cause: e.to_string(),
            })?;
            error!(demo = demo.path, error = %e, "Failed to load models");
            return Ok(report.fail(format!("Failed to load models: {}", e)));
        }
    }

    select_model(&mut session, demo, args.model.as_deref())?;

    let mut stored_input = None;
    if let Some(slug) = &args.permalink {
        match client.permalink(slug).await {
            Ok(permalink) => {
                if args.model.is_none() {
                    if let Some(model_id) = permalink.model_id.as_deref() {
                        if demo.has_model(model_id) {
                            session.dispatch(Action::Select {
                                model_id: model_id.to_string(),
                            })?;
                        }
                    }
                }
                stored_input = Some(permalink.request_data);
            }
            Err(e) => {
                warn!(
                    slug = %slug,
                    error = %e,
                    "Failed to fetch permalink, continuing without it"
                );
            }
        }
    }

    let body = build_input(stored_input, args.input.as_deref(), &args.fields)?;
    let model_id = session
        .state()
        .selected_model()
        .map(|m| m.id().to_string())
        .ok_or_else(|| anyhow!("No model selected"))?;

    let input = Input::new(body);
    let input_id = input.id;
    session.dispatch(Action::Predicting {
        input: input.clone(),
    })?;

    match client.call(&model_id, ModelAction::Predict, &input.body).await {
        Ok(output) => {
            session.dispatch(Action::ReceivedPrediction {
                prediction: Prediction { input, output },
            })?;
        }
        Err(e) => {
            session.dispatch(Action::PredictError {
                input: input_id,
                cause: e.to_string(),
            })?;
            error!(model_id = %model_id, error = %e, "Prediction failed");
            return Ok(report.fail(PREDICT_FAILED));
        }
    }

    let Some(prediction) = session.state().prediction() else {
        return Ok(report.fail(PREDICT_FAILED));
    };

    let kind = OutputKind::for_task(demo.task_id);
    let rendered = render_prediction(kind, &prediction.output, args.tree).or_else(|e| {
        warn!(error = %e, "Falling back to raw output");
        pretty(&prediction.output)
    })?;
    report.output.push(rendered);

    if let Some(interpreter) = args.interpret {
        let action = ModelAction::Interpret(interpreter);
        let rendered = match client.call(&model_id, action, &prediction.input.body).await {
            Ok(interpretation) => render_saliency(
                &prediction.output,
                interpretation,
                SaliencyOptions {
                    top_k: args.top_k,
                    min_weight: args.min_weight,
                },
            ),
            Err(e) => Err(e),
        };

        match rendered {
            Ok(text) => report.output.push(text),
            Err(e) => {
                error!(
                    model_id = %model_id,
                    interpreter = %interpreter,
                    error = %e,
                    "Interpretation failed"
                );
                return Ok(report.fail(PREDICT_FAILED));
            }
        }
    }

    if let Some(attacker) = args.attack {
        let action = ModelAction::Attack(attacker);
        match client.call(&model_id, action, &prediction.input.body).await {
            Ok(output) => report.output.push(pretty(&output)?),
            Err(e) => {
                error!(model_id = %model_id, attacker = %attacker, error = %e, "Attack failed");
                return Ok(report.fail(PREDICT_FAILED));
            }
        }
    }

    if args.share {
        let mut permalink =
            NewPermalink::new(prediction.input.body.clone()).with_model_id(&model_id);
        if let Some(task_id) = demo.task_id {
            permalink = permalink.with_task_name(task_id);
        }

        let slug = client
            .create_permalink(&permalink)
            .await
            .context("Failed to create permalink")?;
        report.output.push(format!("Permalink: {}", slug));
    }

    Ok(report)
}

/// Fetches every model's info concurrently. Cards are optional.
async fn load_models(client: &DemoClient, model_ids: &[String]) -> Result<Vec<Model>, DomainError> {
    let loads = model_ids.iter().map(|id| async move {
        let info = client.info(id).await?;
        let mut model = Model::new(info);

        match model_card_id(&model.info) {
            Ok(card_id) => match client.model_card(&card_id).await {
                Ok(card) => model = model.with_card(card),
                Err(e) => debug!(model_id = %id, error = %e, "No model card"),
            },
            Err(e) => debug!(model_id = %id, error = %e, "No model card id"),
        }

        Ok::<_, DomainError>(model)
    });

    join_all(loads).await.into_iter().collect()
}

fn select_model(
    session: &mut Session,
    demo: &DemoConfig,
    requested: Option<&str>,
) -> anyhow::Result<()> {
    let Some(model_id) = requested else {
        return Ok(());
    };

    if is_legacy_permalink(model_id, demo.model_ids) {
        warn!(
            segment = model_id,
            "Old-style permalink given as model, using the default model"
        );
        return Ok(());
    }

    session.dispatch(Action::Select {
        model_id: model_id.to_string(),
    })?;
    Ok(())
}

/// Merges the input sources: a stored permalink input, then `--input`, then
/// each `--field`.
fn build_input(
    stored: Option<Value>,
    input: Option<&str>,
    fields: &[(String, Value)],
) -> anyhow::Result<Value> {
    let mut body = match input {
        Some(raw) => serde_json::from_str(raw).context("--input is not valid JSON")?,
        None => stored.unwrap_or_else(|| Value::Object(Map::new())),
    };

    if !fields.is_empty() {
        let Value::Object(map) = &mut body else {
            bail!("--field needs an object input");
        };
        for (key, value) in fields {
            map.insert(key.clone(), value.clone());
        }
    }

    match &body {
        Value::Object(map) if map.is_empty() => {
            bail!("No input given; use --input, --field or --permalink")
        }
        Value::Object(_) => Ok(body),
        _ => bail!("Input must be a JSON object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PredictArgs,
    }

    fn parse(argv: &[&str]) -> PredictArgs {
        TestCli::parse_from(std::iter::once("predict").chain(argv.iter().copied())).args
    }

    async fn mount_info(server: &MockServer, model_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}", model_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": model_id,
                "interpreters": ["simple_gradient"]
            })))
            .mount(server)
            .await;
    }

    async fn ner_server() -> MockServer {
        let server = MockServer::start().await;
        mount_info(&server, "named-entity-recognition").await;
        mount_info(&server, "fine-grained-ner").await;
        server
    }

    fn client(server: &MockServer) -> DemoClient {
        DemoClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("sentence=Hello there").unwrap(),
            ("sentence".to_string(), json!("Hello there"))
        );
        assert_eq!(parse_field("k=3").unwrap(), ("k".to_string(), json!(3)));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = parse(&["named-entity-recognition", "--field", "sentence=Hi"]);
        assert_eq!(args.top_k, DEFAULT_TOP_K);
        assert_eq!(args.api_url, "http://localhost:8080");
        assert_eq!(args.fields.len(), 1);
        assert!(args.interpret.is_none());

        let args = parse(&["srl", "--interpret", "smooth_gradient", "--attack", "hotflip"]);
        assert_eq!(args.interpret, Some(InterpreterId::SmoothGradient));
        assert_eq!(args.attack, Some(AttackerId::Hotflip));
    }

    #[test]
    fn test_build_input() {
        let stored = Some(json!({"sentence": "stored", "extra": 1}));
        let fields = vec![("sentence".to_string(), json!("new"))];

        let body = build_input(stored.clone(), None, &fields).unwrap();
        assert_eq!(body, json!({"sentence": "new", "extra": 1}));

        let body = build_input(stored, Some(r#"{"question": "q"}"#), &[]).unwrap();
        assert_eq!(body, json!({"question": "q"}));

        assert!(build_input(None, None, &[]).is_err());
        assert!(build_input(None, Some("[1]"), &[]).is_err());
        assert!(build_input(None, Some("{oops"), &[]).is_err());
    }

    #[tokio::test]
    async fn test_predict_renders_entities() {
        let server = ner_server().await;
        Mock::given(method("POST"))
            .and(path("/api/named-entity-recognition/predict"))
            .and(body_json(json!({"sentence": "Obama visited Paris"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": ["Obama", "visited", "Paris"],
                "tags": ["U-PER", "O", "U-LOC"]
            })))
            .mount(&server)
            .await;

        let args = parse(&[
            "named-entity-recognition",
            "--field",
            "sentence=Obama visited Paris",
        ]);
        let report = execute(&client(&server), &args).await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.output, vec!["[Obama](PER) visited [Paris](LOC)"]);
    }

    #[tokio::test]
    async fn test_predict_selects_requested_model() {
        let server = ner_server().await;
        Mock::given(method("POST"))
            .and(path("/api/fine-grained-ner/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": ["Paris"],
                "tags": ["U-GPE"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = parse(&[
            "named-entity-recognition",
            "--model",
            "fine-grained-ner",
            "--field",
            "sentence=Paris",
        ]);
        let report = execute(&client(&server), &args).await.unwrap();
        assert_eq!(report.output, vec!["[Paris](GPE)"]);
    }

    #[tokio::test]
    async fn test_legacy_permalink_model_falls_back_to_default() {
        let server = ner_server().await;
        Mock::given(method("POST"))
            .and(path("/api/named-entity-recognition/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": ["Hi"],
                "tags": ["O"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // "MTA1Mjc3NA==" decodes to 1052774
        let args = parse(&[
            "named-entity-recognition",
            "--model",
            "MTA1Mjc3NA==",
            "--field",
            "sentence=Hi",
        ]);
        let report = execute(&client(&server), &args).await.unwrap();
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_unknown_model_is_an_error() {
        let server = ner_server().await;
        let args = parse(&[
            "named-entity-recognition",
            "--model",
            "bidaf",
            "--field",
            "sentence=Hi",
        ]);

        let err = execute(&client(&server), &args).await.unwrap_err();
        assert!(err.to_string().contains("bidaf"));
    }

    #[tokio::test]
    async fn test_load_error_fails() {
        let server = MockServer::start().await;
        mount_info(&server, "named-entity-recognition").await;
        Mock::given(method("GET"))
            .and(path("/api/fine-grained-ner"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let args = parse(&["named-entity-recognition", "--field", "sentence=Hi"]);
        let report = execute(&client(&server), &args).await.unwrap();

        assert!(!report.is_success());
        assert!(report.error.unwrap().starts_with("Failed to load models"));
    }

    #[tokio::test]
    async fn test_prediction_failure() {
        let server = ner_server().await;
        Mock::given(method("POST"))
            .and(path("/api/named-entity-recognition/predict"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let args = parse(&["named-entity-recognition", "--field", "sentence=Hi"]);
        let report = execute(&client(&server), &args).await.unwrap();

        assert_eq!(report.error.as_deref(), Some("Something went wrong."));
        assert!(report.output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_permalink_degrades_gracefully() {
        let server = ner_server().await;
        Mock::given(method("GET"))
            .and(path("/api/permalink/MA=="))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/named-entity-recognition/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": ["Hi"],
                "tags": ["O"]
            })))
            .mount(&server)
            .await;

        let args = parse(&[
            "named-entity-recognition",
            "--permalink",
            "MA==",
            "--field",
            "sentence=Hi",
        ]);
        let report = execute(&client(&server), &args).await.unwrap();
        assert_eq!(report.output, vec!["Hi"]);
    }

    #[tokio::test]
    async fn test_permalink_input_and_model() {
        let server = ner_server().await;
        Mock::given(method("GET"))
            .and(path("/api/permalink/MA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model_name": null,
                "request_data": {"sentence": "Paris"},
                "model_id": "fine-grained-ner",
                "task_name": "ner"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/fine-grained-ner/predict"))
            .and(body_json(json!({"sentence": "Paris"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "words": ["Paris"],
                "tags": ["U-GPE"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let args = parse(&["named-entity-recognition", "--permalink", "MA=="]);
        let report = execute(&client(&server), &args).await.unwrap();
        assert_eq!(report.output, vec!["[Paris](GPE)"]);
    }

    #[tokio::test]
    async fn test_interpret_and_share() {
        let server = MockServer::start().await;
        mount_info(&server, "glove-sentiment-analysis").await;
        mount_info(&server, "roberta-sentiment-analysis").await;
        Mock::given(method("POST"))
            .and(path("/api/glove-sentiment-analysis/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tokens": ["a", "great", "movie"],
                "label": "1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/glove-sentiment-analysis/interpret/simple_gradient"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instance_1": {"grad_input_1": [0.1, 0.8, 0.1]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/permalink/"))
            .and(body_json(json!({
                "model_name": null,
                "request_data": {"sentence": "a great movie"},
                "model_id": "glove-sentiment-analysis",
                "task_name": "sentiment-analysis"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("MA==")))
            .mount(&server)
            .await;

        let args = parse(&[
            "sentiment-analysis",
            "--field",
            "sentence=a great movie",
            "--interpret",
            "simple_gradient",
            "--top-k",
            "1",
            "--share",
        ]);
        let report = execute(&client(&server), &args).await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.output.len(), 3);
        assert!(report.output[1].contains("great"));
        assert_eq!(report.output[2], "Permalink: MA==");
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_min_weight() {
        let server = MockServer::start().await;
        let args = parse(&[
            "sentiment-analysis",
            "--field",
            "sentence=x",
            "--min-weight",
            "150",
        ]);
        assert!(execute(&client(&server), &args).await.is_err());
    }
}
