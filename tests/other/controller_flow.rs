//! Controller flows driven end to end through the public API.
//!
//! Key events go through `pacviz::events`, effects run on real `Workers`
//! against a `MemorySource` and a scripted AUR transport, and results come
//! back through the message channel exactly as in the runtime.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use pacviz::app::Workers;
use pacviz::events::{handle_event, handle_message};
use pacviz::sources::aur::{AurPackage, AurResponse};
use pacviz::sources::{AurClient, MemorySource, PackageSource, RpcTransport};
use pacviz::state::{
    AppMessage, AppState, Effect, InputMode, InstallReason, OpState, Package, ViewMode,
};

/// AUR transport answering from a fixed package list.
#[derive(Default)]
struct ScriptedAur {
    /// Packages the AUR "knows".
    packages: Vec<AurPackage>,
}

impl ScriptedAur {
    fn with(names: &[&str]) -> Self {
        Self {
            packages: names
                .iter()
                .map(|n| AurPackage {
                    name: (*n).to_string(),
                    version: "1.0-1".into(),
                    description: Some(format!("{n} from the AUR")),
                    ..AurPackage::default()
                })
                .collect(),
        }
    }
}

impl RpcTransport for ScriptedAur {
    async fn get(&self, url: &str) -> Result<AurResponse, String> {
        let results = if let Some((_, query)) = url.split_once("/search/") {
            self.packages
                .iter()
                .filter(|p| p.name.contains(query))
                .cloned()
                .collect()
        } else {
            let asked: Vec<&str> = url
                .split('&')
                .filter_map(|part| part.split("arg[]=").nth(1))
                .collect();
            self.packages
                .iter()
                .filter(|p| asked.contains(&p.name.as_str()))
                .cloned()
                .collect()
        };
        Ok(AurResponse {
            results,
            ..AurResponse::default()
        })
    }
}

/// Application, workers, and the result channel they report on.
struct Harness {
    app: AppState,
    workers: Workers<ScriptedAur>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
    source: Arc<MemorySource>,
}

impl Harness {
    fn new(source: MemorySource, aur: ScriptedAur) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Arc::new(source);
        let dyn_source: Arc<dyn PackageSource> = source.clone();
        let client = AurClient::with_transport(aur, "http://aur.test/rpc/v5", Duration::from_secs(60));
        let workers = Workers::new(dyn_source, Some(Arc::new(client)), tx);
        let mut app = AppState::default();
        app.viewport.height = 20;
        Self {
            app,
            workers,
            rx,
            source,
        }
    }

    /// What: Execute effects and apply results until the channel goes quiet.
    async fn settle(&mut self, effects: Vec<Effect>) {
        let mut pending = effects;
        loop {
            for effect in pending.drain(..) {
                if !matches!(effect, Effect::Quit | Effect::HelperInstall { .. }) {
                    self.workers.execute(effect);
                }
            }
            match tokio::time::timeout(Duration::from_millis(150), self.rx.recv()).await {
                Ok(Some(msg)) => pending = handle_message(&mut self.app, msg),
                _ => break,
            }
        }
    }

    async fn key(&mut self, code: KeyCode) {
        let effects = handle_event(
            &CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            &mut self.app,
        );
        self.settle(effects).await;
    }

    async fn command(&mut self, text: &str) {
        self.key(KeyCode::Char(':')).await;
        for c in text.chars() {
            self.key(KeyCode::Char(c)).await;
        }
        self.key(KeyCode::Enter).await;
    }

    fn visible_names(&self) -> Vec<String> {
        self.app
            .viewport
            .visible_rows()
            .filter_map(|r| self.app.viewport.package_of(r))
            .map(|p| p.name.clone())
            .collect()
    }
}

fn pkg(name: &str, reason: InstallReason) -> Package {
    Package {
        name: name.into(),
        version: "1.0-1".into(),
        repository: "extra".into(),
        installed: true,
        install_reason: reason,
        ..Package::default()
    }
}

fn installed() -> Vec<Package> {
    let mut yay = pkg("yay-bin", InstallReason::Explicit);
    yay.is_foreign = true;
    yay.repository = "local".into();
    vec![
        pkg("bash", InstallReason::Explicit),
        pkg("vim", InstallReason::Explicit),
        pkg("glibc", InstallReason::Dependency),
        yay,
    ]
}

fn catalog() -> Vec<Package> {
    vec![
        pkg("vim", InstallReason::Unknown),
        Package {
            name: "vim-airline".into(),
            version: "0.11-1".into(),
            repository: "extra".into(),
            ..Package::default()
        },
    ]
}

#[tokio::test(flavor = "multi_thread")]
/// What: Startup load shows the explicit preset and reclassifies foreign AUR packages.
///
/// Output:
/// - `yay-bin` becomes an AUR package with repository `aur`
async fn startup_load_reclassifies_foreign_packages() {
    let mut h = Harness::new(
        MemorySource::new(installed(), catalog()),
        ScriptedAur::with(&["yay-bin", "vim-git"]),
    );
    h.settle(vec![Effect::LoadPackages]).await;

    assert!(!h.app.loading);
    assert_eq!(h.visible_names(), vec!["bash", "vim", "yay-bin"]);
    let yay = h
        .app
        .local_packages
        .iter()
        .find(|p| p.name == "yay-bin")
        .expect("yay-bin loaded");
    assert!(yay.is_aur);
    assert_eq!(yay.repository, "aur");

    h.command("p aur").await;
    assert_eq!(h.visible_names(), vec!["yay-bin"]);
}

#[tokio::test(flavor = "multi_thread")]
/// What: A search merges both sources and Esc restores the local view.
///
/// Output:
/// - Sync results first on name collision, AUR-only names added, installed flag set
async fn search_merges_sources_and_escape_restores() {
    let mut h = Harness::new(
        MemorySource::new(installed(), catalog()),
        ScriptedAur::with(&["vim", "vim-git"]),
    );
    h.settle(vec![Effect::LoadPackages]).await;

    h.command("s vim").await;
    assert_eq!(h.app.view_mode, ViewMode::Remote);
    assert!(h.app.search.is_none());
    assert_eq!(h.visible_names(), vec!["vim", "vim-airline", "vim-git"]);
    let vim = h
        .app
        .viewport
        .packages()
        .iter()
        .find(|p| p.name == "vim")
        .expect("vim result");
    assert!(!vim.is_aur);
    assert!(vim.installed);

    h.key(KeyCode::Esc).await;
    assert_eq!(h.app.view_mode, ViewMode::Local);
    assert_eq!(h.visible_names(), vec!["bash", "vim", "yay-bin"]);
}

#[tokio::test(flavor = "multi_thread")]
/// What: A search with no hits on either side reports it in the status.
async fn empty_search_reports_message() {
    let mut h = Harness::new(MemorySource::new(installed(), catalog()), ScriptedAur::default());
    h.settle(vec![Effect::LoadPackages]).await;

    h.command("s nothing-matches").await;
    assert!(h.visible_names().is_empty());
    assert!(h.app.remote_error.is_some());
}

#[tokio::test(flavor = "multi_thread")]
/// What: Remove goes through confirm, password, execution, and reload.
///
/// Output:
/// - The source sees a non-cascading remove with a credential, then a refresh
/// - The package disappears from the reloaded table
async fn remove_with_password_reloads() {
    let mut h = Harness::new(MemorySource::new(installed(), catalog()), ScriptedAur::default());
    h.settle(vec![Effect::LoadPackages]).await;

    h.key(KeyCode::Char('j')).await;
    assert_eq!(
        h.app.viewport.selected_package().map(|p| p.name.clone()),
        Some("vim".to_string())
    );
    h.command("r").await;
    assert!(matches!(h.app.op, OpState::PendingConfirm(_)));
    h.key(KeyCode::Enter).await;
    assert_eq!(h.app.mode, InputMode::Password);
    for c in "secret".chars() {
        h.key(KeyCode::Char(c)).await;
    }
    h.key(KeyCode::Enter).await;

    assert!(matches!(h.app.op, OpState::Completed { error: None, .. }));
    assert!(h.app.password.is_empty());
    let calls = h.source.calls();
    assert!(calls.contains(&"remove:vim:false:pw".to_string()));
    assert!(calls.contains(&"refresh".to_string()));
    assert_eq!(h.visible_names(), vec!["bash", "yay-bin"]);

    h.key(KeyCode::Enter).await;
    assert_eq!(h.app.op, OpState::Idle);
}

#[tokio::test(flavor = "multi_thread")]
/// What: A failing install completes with the error and still reloads.
async fn failed_install_reports_error() {
    let mut h = Harness::new(
        MemorySource::new(installed(), catalog()).failing_transactions("database locked"),
        ScriptedAur::default(),
    );
    h.app.privileged = true;
    h.settle(vec![Effect::LoadPackages]).await;

    h.command("s airline").await;
    assert_eq!(h.visible_names(), vec!["vim-airline"]);
    h.command("i").await;
    h.key(KeyCode::Enter).await;

    match &h.app.op {
        OpState::Completed { error: Some(e), .. } => assert!(e.contains("database locked")),
        other => panic!("unexpected op state: {other:?}"),
    }
    assert!(h.source.calls().contains(&"install:vim-airline:root".to_string()));
    assert_eq!(h.app.view_mode, ViewMode::Remote);
    assert_eq!(h.visible_names(), vec!["vim-airline"]);
}
