//! Screen addresses.
//!
//! Routes keep the URL shape of the web front-end (`/celulas/7/novo_membro`) so that
//! paths in logs and configuration read the same everywhere.

use std::fmt;

use super::entities::RecordId;

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Celulas,
    NovaCelula,
    Celula(RecordId),
    EditarCelula(RecordId),
    NovoMembro(RecordId),
    NovoEncontro(RecordId),
    Redes,
    NovaRede,
    Supervisores,
    Cultos,
    NovoCulto,
    Culto(RecordId),
    EditarCulto(RecordId),
    Turmas,
    Turma(RecordId),
}

impl Route {
    /// Top-level sections listed in the sidebar, in display order.
    pub const SECTIONS: [Self; 6] = [
        Self::Dashboard,
        Self::Celulas,
        Self::Redes,
        Self::Supervisores,
        Self::Cultos,
        Self::Turmas,
    ];

    /// Renders the route as a path.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Celulas => "/celulas".to_string(),
            Self::NovaCelula => "/celulas/novo_celula".to_string(),
            Self::Celula(id) => format!("/celulas/{id}"),
            Self::EditarCelula(id) => format!("/celulas/{id}/editar"),
            Self::NovoMembro(id) => format!("/celulas/{id}/novo_membro"),
            Self::NovoEncontro(id) => format!("/celulas/{id}/novo_encontro"),
            Self::Redes => "/redes".to_string(),
            Self::NovaRede => "/redes/nova_rede".to_string(),
            Self::Supervisores => "/supervisores".to_string(),
            Self::Cultos => "/cultos".to_string(),
            Self::NovoCulto => "/cultos/novo_culto".to_string(),
            Self::Culto(id) => format!("/cultos/{id}"),
            Self::EditarCulto(id) => format!("/cultos/{id}/editar"),
            Self::Turmas => "/escola_biblica/turmas".to_string(),
            Self::Turma(id) => format!("/escola_biblica/turmas/{id}"),
        }
    }

    /// Parses a path back into a route. Trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let id = |segment: &str| segment.parse::<RecordId>().ok();

        let route = match segments.as_slice() {
            [] | ["dashboard"] => Self::Dashboard,
            ["login"] => Self::Login,
            ["celulas"] => Self::Celulas,
            ["celulas", "novo_celula"] => Self::NovaCelula,
            ["celulas", raw] => Self::Celula(id(raw)?),
            ["celulas", raw, "editar"] => Self::EditarCelula(id(raw)?),
            ["celulas", raw, "novo_membro"] => Self::NovoMembro(id(raw)?),
            ["celulas", raw, "novo_encontro"] => Self::NovoEncontro(id(raw)?),
            ["redes"] => Self::Redes,
            ["redes", "nova_rede"] => Self::NovaRede,
            ["supervisores"] => Self::Supervisores,
            ["cultos"] => Self::Cultos,
            ["cultos", "novo_culto"] => Self::NovoCulto,
            ["cultos", raw] => Self::Culto(id(raw)?),
            ["cultos", raw, "editar"] => Self::EditarCulto(id(raw)?),
            ["escola_biblica", "turmas"] => Self::Turmas,
            ["escola_biblica", "turmas", raw] => Self::Turma(id(raw)?),
            _ => return None,
        };

        Some(route)
    }

    /// Screen reached when the user backs out of this one.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Login | Self::Dashboard => None,
            Self::Celulas | Self::Redes | Self::Supervisores | Self::Cultos | Self::Turmas => {
                Some(Self::Dashboard)
            }
            Self::NovaCelula | Self::Celula(_) => Some(Self::Celulas),
            Self::EditarCelula(id) | Self::NovoMembro(id) | Self::NovoEncontro(id) => {
                Some(Self::Celula(id))
            }
            Self::NovaRede => Some(Self::Redes),
            Self::NovoCulto | Self::Culto(_) => Some(Self::Cultos),
            Self::EditarCulto(id) => Some(Self::Culto(id)),
            Self::Turma(_) => Some(Self::Turmas),
        }
    }

    /// Top-level section this route belongs to, for sidebar highlighting.
    #[must_use]
    pub const fn section(self) -> Self {
        match self {
            Self::Login | Self::Dashboard => Self::Dashboard,
            Self::Celulas
            | Self::NovaCelula
            | Self::Celula(_)
            | Self::EditarCelula(_)
            | Self::NovoMembro(_)
            | Self::NovoEncontro(_) => Self::Celulas,
            Self::Redes | Self::NovaRede => Self::Redes,
            Self::Supervisores => Self::Supervisores,
            Self::Cultos | Self::NovoCulto | Self::Culto(_) | Self::EditarCulto(_) => Self::Cultos,
            Self::Turmas | Self::Turma(_) => Self::Turmas,
        }
    }

    /// Whether the screen needs a session to be shown.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Visão Geral",
            Self::Celulas => "Células",
            Self::NovaCelula => "Nova Célula",
            Self::Celula(_) => "Detalhes da célula",
            Self::EditarCelula(_) => "Editar Célula",
            Self::NovoMembro(_) => "Novo Membro",
            Self::NovoEncontro(_) => "Novo Encontro",
            Self::Redes => "Redes",
            Self::NovaRede => "Nova Rede",
            Self::Supervisores => "Supervisores",
            Self::Cultos => "Registro de Cultos",
            Self::NovoCulto => "Novo Culto",
            Self::Culto(_) => "Detalhes do culto",
            Self::EditarCulto(_) => "Editar Culto",
            Self::Turmas => "Turmas",
            Self::Turma(_) => "Detalhes da turma",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
