//! Per-route screens.
//!
//! Every page starts in [`Loadable::Loading`] and moves to `Ready` or `Failed` as the
//! backend reports. Pages never fetch on their own; they only fold [`PageData`] in.

mod celula_page;
mod culto_page;
mod dashboard;
mod form_page;
mod list_page;
mod turma_page;

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::application::forms::FormState;
use crate::domain::Route;
use crate::domain::entities::{Celula, Culto, RecordId, Rede, Supervisor, Turma};
use crate::domain::errors::ApiError;

use super::backend::PageData;

pub use celula_page::CelulaPage;
pub use culto_page::CultoPage;
pub use dashboard::DashboardPage;
pub use form_page::{FormPage, form_kind};
pub use list_page::ListPage;
pub use turma_page::TurmaPage;

/// Fetch state of one page or page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Loadable<T> {
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.user_message()),
        }
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> Loadable<Vec<T>> {
    /// Rows to show: the data when ready, nothing otherwise.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Ready(rows) => rows,
            _ => &[],
        }
    }
}

/// What a page wants done after a key press.
#[derive(Debug)]
pub enum PageAction {
    /// The page did not use the key; global bindings apply.
    Ignored,
    Handled,
    Navigate(Route),
    Submit(Box<FormState>),
    DeleteCelula(RecordId),
}

/// The screen for the current route.
pub enum Page {
    Dashboard(DashboardPage),
    Celulas(ListPage<Celula>),
    Redes(ListPage<Rede>),
    Supervisores(ListPage<Supervisor>),
    Cultos(ListPage<Culto>),
    Turmas(ListPage<Turma>),
    Celula(CelulaPage),
    Culto(CultoPage),
    Turma(TurmaPage),
    Form(Box<FormPage>),
}

impl Page {
    /// Fresh page for a route; `None` for the login screen.
    #[must_use]
    pub fn for_route(route: Route) -> Option<Self> {
        let page = match route {
            Route::Login => return None,
            Route::Dashboard => Self::Dashboard(DashboardPage::new()),
            Route::Celulas => Self::Celulas(ListPage::new("Células", Some(Route::NovaCelula))),
            Route::Redes => Self::Redes(ListPage::new("Redes", Some(Route::NovaRede))),
            Route::Supervisores => Self::Supervisores(ListPage::new("Supervisores", None)),
            Route::Cultos => {
                Self::Cultos(ListPage::new("Registro de Cultos", Some(Route::NovoCulto)))
            }
            Route::Turmas => Self::Turmas(ListPage::new("Turmas", None)),
            Route::Celula(id) => Self::Celula(CelulaPage::new(id)),
            Route::Culto(id) => Self::Culto(CultoPage::new(id)),
            Route::Turma(id) => Self::Turma(TurmaPage::new(id)),
            Route::NovaCelula
            | Route::EditarCelula(_)
            | Route::NovoMembro(_)
            | Route::NovoEncontro(_)
            | Route::NovaRede
            | Route::NovoCulto
            | Route::EditarCulto(_) => Self::Form(Box::new(FormPage::for_route(route)?)),
        };
        Some(page)
    }

    /// Folds one fetch result into the page. Results for other pages are ignored.
    pub fn apply(&mut self, data: PageData) {
        match (self, data) {
            (Self::Dashboard(page), PageData::Dashboard(counts)) => page.set_counts(counts),
            (Self::Celulas(page), PageData::Celulas(result)) => page.set_rows(result),
            (Self::Redes(page), PageData::Redes(result)) => page.set_rows(result),
            (Self::Supervisores(page), PageData::Supervisores(result)) => page.set_rows(result),
            (Self::Cultos(page), PageData::Cultos(result)) => page.set_rows(result),
            (Self::Turmas(page), PageData::Turmas(result)) => page.set_rows(result),
            (Self::Celula(page), data) => page.apply(data),
            (Self::Culto(page), PageData::Culto(result)) => page.set_culto(result),
            (Self::Turma(page), data) => page.apply(data),
            (Self::Form(page), data) => page.apply(data),
            (_, data) => tracing::debug!(?data, "Dropped result for another page"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PageAction {
        match self {
            Self::Dashboard(page) => page.handle_key(key),
            Self::Celulas(page) => page.handle_key(key),
            Self::Redes(page) => page.handle_key(key),
            Self::Supervisores(page) => page.handle_key(key),
            Self::Cultos(page) => page.handle_key(key),
            Self::Turmas(page) => page.handle_key(key),
            Self::Celula(page) => page.handle_key(key),
            Self::Culto(page) => page.handle_key(key),
            Self::Turma(page) => page.handle_key(key),
            Self::Form(page) => page.handle_key(key),
        }
    }

    /// Whether plain letters belong to the page (text fields) rather than to shortcuts.
    #[must_use]
    pub fn captures_text(&self) -> bool {
        match self {
            Self::Form(page) => page.is_editable(),
            Self::Celulas(page) => page.is_confirming(),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self {
            Self::Dashboard(page) => page.is_loading(),
            Self::Celulas(page) => page.is_loading(),
            Self::Redes(page) => page.is_loading(),
            Self::Supervisores(page) => page.is_loading(),
            Self::Cultos(page) => page.is_loading(),
            Self::Turmas(page) => page.is_loading(),
            Self::Celula(page) => page.is_loading(),
            Self::Culto(page) => page.is_loading(),
            Self::Turma(page) => page.is_loading(),
            Self::Form(page) => page.is_loading(),
        }
    }

    /// Key hints for the status bar.
    #[must_use]
    pub const fn hints(&self) -> &'static str {
        match self {
            Self::Dashboard(_) => "←/→ Enter: abrir | 1-6: seções | r: recarregar | q: sair",
            Self::Celulas(_) | Self::Redes(_) | Self::Cultos(_) => {
                "↑/↓ | n: novo | Esc: voltar | r: recarregar"
            }
            Self::Supervisores(_) | Self::Turmas(_) => "↑/↓ | Esc: voltar | r: recarregar",
            Self::Celula(_) => {
                "Tab: seção | e: editar | m: novo membro | n: novo encontro | Esc: voltar"
            }
            Self::Culto(_) => "e: editar | Esc: voltar | r: recarregar",
            Self::Turma(_) => "Tab: seção | Esc: voltar | r: recarregar",
            Self::Form(_) => "Tab: próximo | Ctrl+S: salvar | Esc: cancelar",
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        match self {
            Self::Dashboard(page) => page.render(area, buf),
            Self::Celulas(page) => page.render(area, buf),
            Self::Redes(page) => page.render(area, buf),
            Self::Supervisores(page) => page.render(area, buf),
            Self::Cultos(page) => page.render(area, buf),
            Self::Turmas(page) => page.render(area, buf),
            Self::Celula(page) => page.render(area, buf),
            Self::Culto(page) => page.render(area, buf),
            Self::Turma(page) => page.render(area, buf),
            Self::Form(page) => page.render(area, buf),
        }
    }

    /// Hands a form back after a failed or rejected submission.
    pub fn restore_form(&mut self, form: FormState) {
        if let Self::Form(page) = self {
            page.restore(form);
        }
    }
}

/// Placeholder body for a page that is loading or failed as a whole.
pub(super) fn render_status<T>(
    state: &Loadable<T>,
    title: &str,
    area: Rect,
    buf: &mut Buffer,
) -> bool {
    let (text, style) = match state {
        Loadable::Ready(_) => return false,
        Loadable::Loading => (
            "Carregando...".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ),
        Loadable::Failed(message) => (
            format!("Erro ao carregar: {message}\n\nPressione r para tentar novamente."),
            Style::default().fg(Color::Red),
        ),
    };
    Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} ")),
        )
        .render(area, buf);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_but_login_has_a_page() {
        let id = RecordId(3);
        for route in [
            Route::Dashboard,
            Route::Celulas,
            Route::NovaCelula,
            Route::Celula(id),
            Route::EditarCelula(id),
            Route::NovoMembro(id),
            Route::NovoEncontro(id),
            Route::Redes,
            Route::NovaRede,
            Route::Supervisores,
            Route::Cultos,
            Route::NovoCulto,
            Route::Culto(id),
            Route::EditarCulto(id),
            Route::Turmas,
            Route::Turma(id),
        ] {
            let page = Page::for_route(route);
            assert!(page.is_some(), "{route} has no page");
            assert!(page.is_some_and(|p| p.is_loading() || matches!(p, Page::Form(_))));
        }
        assert!(Page::for_route(Route::Login).is_none());
    }

    #[test]
    fn test_results_for_other_pages_are_dropped() {
        let mut page = Page::for_route(Route::Redes).unwrap();
        page.apply(PageData::Celulas(Ok(vec![Celula::new("Hope", "Ana")])));
        assert!(page.is_loading());

        page.apply(PageData::Redes(Ok(vec![Rede::new("Jovens")])));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_loadable_from_error_keeps_server_message() {
        let state: Loadable<Vec<Rede>> =
            Loadable::from_result(Err(ApiError::http(500, "falha interna")));
        assert_eq!(state.error(), Some("falha interna"));
        assert!(state.rows().is_empty());
    }
}
