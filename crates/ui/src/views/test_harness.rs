use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lingo_core::text::Reader;
use services::{
    AppServices, AuthService, CardService, ContextService, FolderService, PictureService, ReaderService,
    ServiceConfig, SubtitleService, TranslateService,
};
use storage::Storage;

use crate::context::{ReaderState, UiApp, build_app_context, use_reader_state_provider};
use crate::views::capture::{Capture, CaptureArea};
use crate::views::{SubtitlesView, TextView};
use crate::vm::CardForm;

// Nothing listens here; requests fail fast with a connection error.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

#[derive(Clone)]
struct TestApp {
    reader: Reader,
    services: AppServices,
}

impl UiApp for TestApp {
    fn initial_reader(&self) -> Reader {
        self.reader.clone()
    }

    fn reader(&self) -> Arc<ReaderService> {
        self.services.reader()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn folders(&self) -> Arc<FolderService> {
        self.services.folders()
    }

    fn cards(&self) -> Arc<CardService> {
        self.services.cards()
    }

    fn translate(&self) -> Arc<TranslateService> {
        self.services.translate()
    }

    fn context(&self) -> Arc<ContextService> {
        self.services.context()
    }

    fn pictures(&self) -> Arc<PictureService> {
        self.services.pictures()
    }

    fn subtitles(&self) -> Arc<SubtitleService> {
        self.services.subtitles()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Text,
    Subtitles,
    /// Capture panel opened on the given selection.
    Capture(&'static str),
}

/// Filled with the shared reader state once the harness has rendered.
#[derive(Clone, Default)]
pub struct ReaderHandle(Rc<RefCell<Option<ReaderState>>>);

impl ReaderHandle {
    pub fn get(&self) -> ReaderState {
        (*self.0.borrow()).expect("reader state registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handle: ReaderHandle,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let state = use_reader_state_provider();
    props.handle.0.borrow_mut().get_or_insert(state);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Text => rsx! { TextView {} },
        ViewKind::Subtitles => rsx! { SubtitlesView {} },
        ViewKind::Capture(text) => rsx! { OpenCapture { text } },
    }
}

#[component]
fn OpenCapture(text: &'static str) -> Element {
    let capture = Capture {
        form: use_signal(|| Some(CardForm::from_selection(text.to_owned()))),
        notice: use_signal(|| None),
    };
    rsx! { CaptureArea { capture } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub reader: ReaderHandle,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Keep polling spawned tasks until `rounds` quiet periods have passed.
    pub async fn settle(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness whose reader starts from what `storage` holds.
pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(
        storage.clone(),
        ServiceConfig::with_backend(UNREACHABLE_BACKEND),
    );
    let reader = services.initial_reader().await;
    let app = Arc::new(TestApp { reader, services });
    let reader = ReaderHandle::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handle: reader.clone(),
        },
    );
    ViewHarness {
        dom,
        storage,
        reader,
    }
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory()).await
}
