//! Domain entity definitions.

mod celula;
mod culto;
mod encontro;
mod membro;
mod record_id;
mod rede;
mod session;
mod supervisor;
mod turma;

pub use celula::{Celula, DIAS_DA_SEMANA, dia_da_semana_label};
pub use culto::Culto;
pub use encontro::Encontro;
pub use membro::Membro;
pub use record_id::{RecordId, SavedRecord};
pub use rede::Rede;
pub use session::{AccessToken, Session, SessionUser};
pub use supervisor::Supervisor;
pub use turma::{Aluno, Aula, Turma};
