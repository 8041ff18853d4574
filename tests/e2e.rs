//! End-to-end tests for outline2html.
//!
//! These drive the full export (host → flatten → render → rewrite →
//! assemble → sink → notice) through in-memory collaborators that record
//! every call, plus one run against a real graph directory on disk.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use async_trait::async_trait;
use outline2html::{
    convert, render_page, setup, Block, ExportConfig, ExportContext, ExportError,
    ExportProgressCallback, FileSink, Graph, GraphHost, Host, Notice, Notifier, Outcome, Page,
    RenderedDocument, Renderer, Sink, SnapshotHost, Step, Toolbar, EXPORT_HTML,
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Route library logs to the test harness; `RUST_LOG=debug` shows them
/// with `--nocapture`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// ── Test collaborators ───────────────────────────────────────────────────────

/// Host answering from fixed data and logging each query.
struct FakeHost {
    page: Option<Page>,
    blocks: Vec<Block>,
    graph_path: String,
    fail_tree: bool,
    fail_graph: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeHost {
    fn new(page: Option<&str>, blocks: Vec<Block>, calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            page: page.map(Page::new),
            blocks,
            graph_path: "/g".to_string(),
            fail_tree: false,
            fail_graph: false,
            calls,
        }
    }
}

#[async_trait]
impl Host for FakeHost {
    async fn current_page(&self) -> Result<Option<Page>, ExportError> {
        self.calls.lock().unwrap().push("current_page".into());
        Ok(self.page.clone())
    }

    async fn page_blocks_tree(&self, page_name: &str) -> Result<Vec<Block>, ExportError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("page_blocks_tree:{page_name}"));
        if self.fail_tree {
            return Err(ExportError::host("page_blocks_tree", "host went away"));
        }
        Ok(self.blocks.clone())
    }

    async fn current_graph(&self) -> Result<Graph, ExportError> {
        self.calls.lock().unwrap().push("current_graph".into());
        if self.fail_graph {
            return Err(ExportError::host("current_graph", "graph unavailable"));
        }
        Ok(Graph {
            path: self.graph_path.clone(),
        })
    }
}

/// Sink keeping every saved document in memory.
#[derive(Default)]
struct MemorySink {
    saved: Mutex<Vec<RenderedDocument>>,
    calls: Option<Arc<Mutex<Vec<String>>>>,
    fail: bool,
}

#[async_trait]
impl Sink for MemorySink {
    async fn save(&self, document: &RenderedDocument) -> Result<(), ExportError> {
        if let Some(calls) = &self.calls {
            calls.lock().unwrap().push(format!("save:{}", document.filename));
        }
        if self.fail {
            return Err(ExportError::OutputWriteFailed {
                path: document.filename.clone().into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saved.lock().unwrap().push(document.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Renderer returning its input unchanged.
struct IdentityRenderer;

impl Renderer for IdentityRenderer {
    fn render(&self, markdown: &str) -> Result<String, ExportError> {
        Ok(markdown.to_string())
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, _markdown: &str) -> Result<String, ExportError> {
        Err(ExportError::RenderFailed("boom".into()))
    }
}

#[derive(Default)]
struct StepLog {
    steps: Mutex<Vec<Step>>,
}

impl ExportProgressCallback for StepLog {
    fn on_step(&self, step: Step) {
        self.steps.lock().unwrap().push(step);
    }
}

struct Harness {
    ctx: ExportContext,
    sink: Arc<MemorySink>,
    notifier: Arc<RecordingNotifier>,
    calls: Arc<Mutex<Vec<String>>>,
}

fn harness_with(host: FakeHost, sink: MemorySink) -> Harness {
    init_tracing();
    let calls = Arc::clone(&host.calls);
    let sink = Arc::new(sink);
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = ExportContext::new(
        Arc::new(host),
        Arc::clone(&sink) as Arc<dyn Sink>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    Harness {
        ctx,
        sink,
        notifier,
        calls,
    }
}

fn harness(page: Option<&str>, blocks: Vec<Block>) -> Harness {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = MemorySink {
        calls: Some(Arc::clone(&calls)),
        ..MemorySink::default()
    };
    harness_with(FakeHost::new(page, blocks, calls), sink)
}

fn identity_config() -> ExportConfig {
    ExportConfig::builder()
        .renderer(Arc::new(IdentityRenderer))
        .build()
        .expect("valid config")
}

fn a_then_b() -> Vec<Block> {
    vec![Block::with_children("A", vec![Block::leaf("B")])]
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn exports_page_with_identity_renderer() {
    let h = harness(Some("Test"), a_then_b());

    let outcome = convert(&h.ctx, &identity_config()).await.unwrap();

    let saved = h.sink.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let doc = &saved[0];
    assert_eq!(doc.filename, "Test.html");
    assert!(doc.content.contains("<title>Test</title>"));
    assert!(doc.content.contains("- A\n  - B"), "got: {}", doc.content);
    assert_eq!(
        outcome,
        Outcome::Exported {
            filename: "Test.html".into(),
            bytes: doc.content.len(),
        }
    );
    assert_eq!(
        *h.notifier.notices.lock().unwrap(),
        vec![Notice::exported("Test.html")]
    );
}

#[tokio::test]
async fn exports_page_with_markdown_renderer() {
    let h = harness(
        Some("Figures"),
        vec![Block::with_children(
            "**Results** $E = mc^2$",
            vec![Block::leaf("![chart](../assets/chart.png)")],
        )],
    );

    convert(&h.ctx, &ExportConfig::default()).await.unwrap();

    let saved = h.sink.saved.lock().unwrap();
    let html = &saved[0].content;
    assert!(html.contains("<strong>Results</strong> $E = mc^2$"), "got: {html}");
    assert!(html.contains("window.MathJax"));
}

#[tokio::test]
async fn asset_images_point_at_graph_folder() {
    let h = harness(Some("P"), vec![Block::leaf("![plot](../assets/plot.png)")]);

    convert(&h.ctx, &ExportConfig::default()).await.unwrap();

    let saved = h.sink.saved.lock().unwrap();
    let html = &saved[0].content;
    assert!(
        html.contains(r#"<img src="file:////g/assets/plot.png" alt="plot" />"#),
        "got: {html}"
    );
    assert!(!html.contains("../assets/"));
}

#[tokio::test]
async fn host_calls_and_save_happen_in_order() {
    let h = harness(Some("Test"), a_then_b());

    convert(&h.ctx, &identity_config()).await.unwrap();

    assert_eq!(
        *h.calls.lock().unwrap(),
        vec![
            "current_page".to_string(),
            "page_blocks_tree:Test".to_string(),
            "current_graph".to_string(),
            "save:Test.html".to_string(),
        ]
    );
}

#[tokio::test]
async fn progress_steps_are_reported_in_order() {
    let h = harness(Some("Test"), a_then_b());
    let log = Arc::new(StepLog::default());
    let config = ExportConfig::builder()
        .renderer(Arc::new(IdentityRenderer))
        .progress_callback(Arc::clone(&log) as Arc<dyn ExportProgressCallback>)
        .build()
        .unwrap();

    convert(&h.ctx, &config).await.unwrap();

    assert_eq!(*log.steps.lock().unwrap(), Step::ALL.to_vec());
}

#[tokio::test]
async fn missing_current_page_warns_and_saves_nothing() {
    let h = harness(None, a_then_b());

    let outcome = convert(&h.ctx, &identity_config()).await.unwrap();

    assert_eq!(outcome, Outcome::NoCurrentPage);
    assert!(h.sink.saved.lock().unwrap().is_empty());
    let notices = h.notifier.notices.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_warning());
    assert_eq!(*h.calls.lock().unwrap(), vec!["current_page".to_string()]);
}

#[tokio::test]
async fn empty_tree_exports_empty_body() {
    let h = harness(Some("Blank"), Vec::new());

    convert(&h.ctx, &ExportConfig::default()).await.unwrap();

    let saved = h.sink.saved.lock().unwrap();
    assert_eq!(saved[0].filename, "Blank.html");
    assert!(saved[0].content.contains("<body>\n  \n</body>"));
}

#[tokio::test]
async fn collapsed_marker_first_occurrence_removed() {
    let h = harness(
        Some("Folds"),
        vec![
            Block::with_children("one collapsed:: true", vec![Block::leaf("x")]),
            Block::with_children("two collapsed:: true", vec![Block::leaf("y")]),
        ],
    );

    convert(&h.ctx, &identity_config()).await.unwrap();

    let saved = h.sink.saved.lock().unwrap();
    let html = &saved[0].content;
    assert!(html.contains("- one \n  - x"), "got: {html}");
    assert!(html.contains("- two collapsed:: true"), "got: {html}");
}

#[tokio::test]
async fn special_characters_in_page_name() {
    let h = harness(Some("Q&A: 2026/10?"), vec![Block::leaf("x")]);

    let outcome = convert(&h.ctx, &identity_config()).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Exported {
            filename: "Q&A: 2026/10?.html".into(),
            bytes: h.sink.saved.lock().unwrap()[0].content.len(),
        }
    );
}

// ── Failure propagation ──────────────────────────────────────────────────────

#[tokio::test]
async fn tree_failure_propagates_without_saving() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut host = FakeHost::new(Some("Test"), a_then_b(), Arc::clone(&calls));
    host.fail_tree = true;
    let h = harness_with(host, MemorySink::default());

    let err = convert(&h.ctx, &identity_config()).await.unwrap_err();

    assert!(matches!(err, ExportError::HostCall { .. }));
    assert!(h.sink.saved.lock().unwrap().is_empty());
    assert!(h.notifier.notices.lock().unwrap().is_empty());
}

#[tokio::test]
async fn graph_failure_propagates_without_saving() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut host = FakeHost::new(Some("Test"), a_then_b(), Arc::clone(&calls));
    host.fail_graph = true;
    let h = harness_with(host, MemorySink::default());

    let err = convert(&h.ctx, &identity_config()).await.unwrap_err();

    assert!(
        matches!(err, ExportError::HostCall { ref operation, .. } if operation == "current_graph"),
        "got: {err}"
    );
    assert!(h.sink.saved.lock().unwrap().is_empty());
    assert!(h.notifier.notices.lock().unwrap().is_empty());
    assert_eq!(
        h.calls.lock().unwrap().last().map(String::as_str),
        Some("current_graph")
    );
}

#[tokio::test]
async fn render_failure_propagates_before_graph_fetch() {
    let h = harness(Some("Test"), a_then_b());
    let config = ExportConfig::builder()
        .renderer(Arc::new(FailingRenderer))
        .build()
        .unwrap();

    let err = convert(&h.ctx, &config).await.unwrap_err();

    assert!(matches!(err, ExportError::RenderFailed(_)));
    assert!(!h.calls.lock().unwrap().contains(&"current_graph".to_string()));
}

#[tokio::test]
async fn save_failure_reports_no_success() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let host = FakeHost::new(Some("Test"), a_then_b(), Arc::clone(&calls));
    let sink = MemorySink {
        fail: true,
        ..MemorySink::default()
    };
    let h = harness_with(host, sink);

    let err = convert(&h.ctx, &identity_config()).await.unwrap_err();

    assert!(matches!(err, ExportError::OutputWriteFailed { .. }));
    assert!(h.notifier.notices.lock().unwrap().is_empty());
}

// ── Action registry ──────────────────────────────────────────────────────────

#[tokio::test]
async fn registered_action_runs_export() {
    let h = harness(Some("Test"), a_then_b());
    let mut toolbar = Toolbar::new();
    setup(&mut toolbar).unwrap();

    let outcome = toolbar
        .dispatch(EXPORT_HTML, &h.ctx, &identity_config())
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Exported { .. }));
    assert_eq!(h.sink.saved.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unregistered_action_is_rejected() {
    let h = harness(Some("Test"), a_then_b());
    let toolbar = Toolbar::new();

    let err = toolbar
        .dispatch(EXPORT_HTML, &h.ctx, &identity_config())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Action { .. }));
    assert!(h.calls.lock().unwrap().is_empty());
}

// ── Real hosts and sinks ─────────────────────────────────────────────────────

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

#[tokio::test]
async fn graph_directory_to_html_file() {
    init_tracing();
    let graph = tempfile::TempDir::new().unwrap();
    write(
        graph.path(),
        "pages/Reading List.md",
        "tags:: books\n\n- Novels\n\tcollapsed:: true\n\t- Dune\n\t  ![cover](../assets/dune.jpg)\n- Essays\n",
    );
    let out = tempfile::TempDir::new().unwrap();

    let host = GraphHost::open(graph.path())
        .unwrap()
        .with_current_page(Some("Reading List"));
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = ExportContext::new(
        Arc::new(host),
        Arc::new(FileSink::new(out.path())),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    let outcome = convert(&ctx, &ExportConfig::default()).await.unwrap();

    assert!(matches!(outcome, Outcome::Exported { ref filename, .. } if filename == "Reading List.html"));
    let html = std::fs::read_to_string(out.path().join("Reading List.html")).unwrap();
    assert!(html.contains("<title>Reading List</title>"));
    assert!(html.contains("Novels"));
    assert!(html.contains("Dune"));
    assert!(!html.contains("collapsed::"), "got: {html}");
    let graph_root = std::path::absolute(graph.path())
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/");
    assert!(
        html.contains(&format!("file:///{graph_root}/assets/dune.jpg")),
        "got: {html}"
    );
    assert_eq!(
        *notifier.notices.lock().unwrap(),
        vec![Notice::exported("Reading List.html")]
    );
}

#[tokio::test]
async fn snapshot_host_round_trip() {
    let host = SnapshotHost::from_json(
        r#"{
            "page": {"originalName": "Test"},
            "graph": {"path": "D:\\vault"},
            "blocks": [{"content": "A", "children": [{"content": "B", "children": []}]}]
        }"#,
        "inline.json",
    )
    .unwrap();
    let sink = Arc::new(MemorySink::default());
    let ctx = ExportContext::new(
        Arc::new(host),
        Arc::clone(&sink) as Arc<dyn Sink>,
        Arc::new(RecordingNotifier::default()),
    );

    convert(&ctx, &identity_config()).await.unwrap();

    let saved = sink.saved.lock().unwrap();
    assert_eq!(saved[0].filename, "Test.html");
    assert!(saved[0].content.contains("- A\n  - B"));
}

#[test]
fn render_page_matches_convert_output() {
    let graph = Graph { path: "/g".into() };
    let doc = render_page("Test", &a_then_b(), &graph, &identity_config()).unwrap();
    assert_eq!(doc.filename, "Test.html");
    assert!(doc.content.contains("<title>Test</title>"));
    assert!(doc.content.contains("- A\n  - B"));
}

#[test]
fn convert_sync_runs_without_a_runtime() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let h = harness_with(
        FakeHost::new(Some("Sync"), a_then_b(), calls),
        MemorySink::default(),
    );
    let outcome = outline2html::convert_sync(&h.ctx, &identity_config()).unwrap();
    assert!(matches!(outcome, Outcome::Exported { .. }));
}
