//! Column lists and row actions for every entity table.

use chrono::NaiveDate;

use crate::domain::Route;
use crate::domain::entities::{
    Aluno, Aula, Celula, Culto, Encontro, Membro, RecordId, Rede, Supervisor, Turma,
    dia_da_semana_label,
};

/// One table column: header plus cell accessor.
pub struct Column<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> String,
}

/// Per-row menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Detalhes,
    Editar,
    Excluir,
}

impl RowAction {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Detalhes => "Detalhes",
            Self::Editar => "Editar",
            Self::Excluir => "Excluir",
        }
    }

    #[must_use]
    pub const fn key_hint(self) -> &'static str {
        match self {
            Self::Detalhes => "Enter",
            Self::Editar => "e",
            Self::Excluir => "x",
        }
    }
}

/// A record that can be listed in a table.
pub trait TableRow: Sized + 'static {
    const COLUMNS: &'static [Column<Self>];

    /// Row actions this table offers. Only células can be deleted; no other resource
    /// has a DELETE endpoint.
    const ACTIONS: &'static [RowAction] = &[];

    fn id(&self) -> RecordId;

    /// Screen reached through a navigation action, if the table offers it.
    fn route_for(&self, _action: RowAction) -> Option<Route> {
        None
    }

    /// Name used in the delete confirmation.
    fn display_name(&self) -> &str;
}

/// Dates in tables read `dd/mm/aaaa`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl TableRow for Celula {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Nome",
            cell: |c| c.nome.clone(),
        },
        Column {
            header: "Lider",
            cell: |c| c.lider.clone(),
        },
        Column {
            header: "Supervisor",
            cell: |c| c.supervisor.clone(),
        },
        Column {
            header: "Quantidade de Membros",
            cell: |c| c.qtd_membros.to_string(),
        },
        Column {
            header: "Local",
            cell: |c| c.local.clone(),
        },
        Column {
            header: "Rede",
            cell: |c| c.rede.clone(),
        },
        Column {
            header: "Dia da Semana",
            cell: |c| dia_da_semana_label(&c.dia_da_semana).to_string(),
        },
        Column {
            header: "Horário",
            cell: |c| c.horario.clone(),
        },
    ];

    const ACTIONS: &'static [RowAction] =
        &[RowAction::Detalhes, RowAction::Editar, RowAction::Excluir];

    fn id(&self) -> RecordId {
        self.id
    }

    fn route_for(&self, action: RowAction) -> Option<Route> {
        match action {
            RowAction::Detalhes => Some(Route::Celula(self.id)),
            RowAction::Editar => Some(Route::EditarCelula(self.id)),
            RowAction::Excluir => None,
        }
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Encontro {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Data",
            cell: |e| format_date(e.data),
        },
        Column {
            header: "Pregador",
            cell: |e| e.pregador.clone(),
        },
        Column {
            header: "Quantidade de presentes",
            cell: |e| e.qtd_presentes.to_string(),
        },
        Column {
            header: "Quantidade de visitantes",
            cell: |e| e.qtd_visitantes.to_string(),
        },
        Column {
            header: "Oferta arrecadada",
            cell: |e| format!("R$ {:.2}", e.oferta_arrecadada),
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.pregador
    }
}

impl TableRow for Membro {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Nome",
            cell: |m| m.nome.clone(),
        },
        Column {
            header: "Telefone",
            cell: |m| m.telefone.clone(),
        },
        Column {
            header: "Email",
            cell: |m| m.email.clone(),
        },
        Column {
            header: "Data de nascimento",
            cell: |m| format_date(m.data_nascimento),
        },
        Column {
            header: "Endereço",
            cell: |m| m.endereco.clone(),
        },
        Column {
            header: "Batizado",
            cell: |m| (if m.batizado { "Sim" } else { "Não" }).to_string(),
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Rede {
    const COLUMNS: &'static [Column<Self>] = &[Column {
        header: "Nome",
        cell: |r| r.display_label().to_string(),
    }];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Supervisor {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "ID",
            cell: |s| s.id.to_string(),
        },
        Column {
            header: "Nome",
            cell: |s| s.nome.clone(),
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Culto {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Nome",
            cell: |c| c.nome.clone(),
        },
        Column {
            header: "Data",
            cell: |c| format_date(c.data),
        },
        Column {
            header: "Pastor",
            cell: |c| c.pastor.clone(),
        },
        Column {
            header: "Presentes",
            cell: |c| c.total_presentes().to_string(),
        },
    ];

    const ACTIONS: &'static [RowAction] = &[RowAction::Detalhes, RowAction::Editar];

    fn id(&self) -> RecordId {
        self.id
    }

    fn route_for(&self, action: RowAction) -> Option<Route> {
        match action {
            RowAction::Detalhes => Some(Route::Culto(self.id)),
            RowAction::Editar => Some(Route::EditarCulto(self.id)),
            RowAction::Excluir => None,
        }
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Turma {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Nome",
            cell: |t| t.nome.clone(),
        },
        Column {
            header: "Descrição",
            cell: |t| t.descricao.clone(),
        },
        Column {
            header: "Período",
            cell: |t| t.periodo.clone(),
        },
        Column {
            header: "Data de Início",
            cell: |t| format_date(t.data_inicio),
        },
        Column {
            header: "Data de Fim",
            cell: |t| format_date(t.data_fim),
        },
    ];

    const ACTIONS: &'static [RowAction] = &[RowAction::Detalhes];

    fn id(&self) -> RecordId {
        self.id
    }

    fn route_for(&self, action: RowAction) -> Option<Route> {
        (action == RowAction::Detalhes).then_some(Route::Turma(self.id))
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Aluno {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Nome",
            cell: |a| a.nome.clone(),
        },
        Column {
            header: "Telefone",
            cell: |a| a.telefone.clone(),
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl TableRow for Aula {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            header: "Data",
            cell: |a| format_date(a.data),
        },
        Column {
            header: "Descrição",
            cell: |a| a.descricao.clone(),
        },
        Column {
            header: "Professor",
            cell: |a| a.professor.clone(),
        },
        Column {
            header: "Quantidade de Presentes",
            cell: |a| a.qtd_presentes.to_string(),
        },
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.descricao
    }
}

/// Renders every cell of a row.
#[must_use]
pub fn cells<T: TableRow>(row: &T) -> Vec<String> {
    T::COLUMNS.iter().map(|column| (column.cell)(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_celula() -> Celula {
        Celula {
            id: RecordId(7),
            nome: "Hope 3".to_string(),
            lider: "Ana".to_string(),
            supervisor: "Carlos".to_string(),
            qtd_membros: 12,
            local: "Rua A".to_string(),
            rede: "Jovens".to_string(),
            dia_da_semana: "Sabado".to_string(),
            horario: "19:30".to_string(),
        }
    }

    #[test]
    fn test_celula_cells_follow_column_order() {
        let row = cells(&sample_celula());
        assert_eq!(row.len(), Celula::COLUMNS.len());
        assert_eq!(row[0], "Hope 3");
        assert_eq!(row[3], "12");
        assert_eq!(row[7], "19:30");
    }

    #[test]
    fn test_only_celulas_offer_delete() {
        assert!(Celula::ACTIONS.contains(&RowAction::Excluir));
        assert!(!Culto::ACTIONS.contains(&RowAction::Excluir));
        assert!(!Turma::ACTIONS.contains(&RowAction::Excluir));
        assert!(Rede::ACTIONS.is_empty());
    }

    #[test]
    fn test_celula_row_routes() {
        let celula = sample_celula();
        assert_eq!(
            celula.route_for(RowAction::Detalhes),
            Some(Route::Celula(RecordId(7)))
        );
        assert_eq!(
            celula.route_for(RowAction::Editar),
            Some(Route::EditarCelula(RecordId(7)))
        );
        assert_eq!(celula.route_for(RowAction::Excluir), None);
    }

    #[test]
    fn test_dates_render_day_first() {
        let encontro = Encontro {
            id: RecordId(1),
            id_celula: RecordId(7),
            data: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            pregador: "João".to_string(),
            qtd_presentes: 10,
            qtd_visitantes: 2,
            oferta_arrecadada: Decimal::new(5050, 2),
            membros_presentes: vec![],
        };
        let row = cells(&encontro);
        assert_eq!(row[0], "09/03/2024");
        assert_eq!(row[4], "R$ 50.50");
    }
}
