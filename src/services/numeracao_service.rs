// src/services/numeracao_service.rs

use chrono::{Datelike, Utc};
use sqlx::PgPool;

use crate::db::SequenciaRepository;

// Numeração sequencial dos pedidos, reiniciada a cada ano.
#[derive(Clone)]
pub struct NumeracaoService {
    repo: SequenciaRepository,
}

impl NumeracaoService {
    pub fn new(repo: SequenciaRepository) -> Self {
        Self { repo }
    }

    /// Próximo número do ano corrente. Nunca falha: se a sequência não puder
    /// avançar, cai no número de emergência baseado no relógio.
    pub async fn proximo_numero(&self, pool: &PgPool) -> String {
        let ano = Utc::now().year();
        match self.repo.incrementar(pool, ano).await {
            Ok(valor) => formatar_numero(ano, valor),
            Err(erro) => {
                tracing::warn!(
                    "Falha ao avançar a sequência de pedidos ({}). Usando número de emergência.",
                    erro
                );
                numero_fallback()
            }
        }
    }
}

/// Formata `PED-<ano>-<sequencial>`, com o sequencial em pelo menos três dígitos.
pub fn formatar_numero(ano: i32, valor: i64) -> String {
    format!("PED-{}-{:03}", ano, valor)
}

/// Número de emergência: único na prática por usar o relógio em milissegundos.
pub fn numero_fallback() -> String {
    format!("PED-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencial_curto_ganha_zeros_a_esquerda() {
        assert_eq!(formatar_numero(2025, 1), "PED-2025-001");
        assert_eq!(formatar_numero(2025, 42), "PED-2025-042");
    }

    #[test]
    fn sequencial_longo_nao_e_cortado() {
        assert_eq!(formatar_numero(2025, 1234), "PED-2025-1234");
    }

    #[test]
    fn numero_de_emergencia_usa_o_relogio() {
        let numero = numero_fallback();
        let digitos = numero.strip_prefix("PED-").unwrap();

        assert!(digitos.len() >= 13);
        assert!(digitos.chars().all(|c| c.is_ascii_digit()));
    }
}
