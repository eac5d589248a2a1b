// src/services/cliente_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClienteRepository,
    models::cliente::{Cliente, TipoCliente},
};

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
}

impl ClienteService {
    pub fn new(repo: ClienteRepository) -> Self {
        Self { repo }
    }

    pub async fn criar(
        &self,
        pool: &PgPool,
        nome: &str,
        documento: &str,
        tipo: TipoCliente,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
    ) -> Result<Cliente, AppError> {
        let documento = normalizar_documento(documento, tipo)?;
        let cliente = self
            .repo
            .criar(
                pool,
                Uuid::new_v4(),
                nome.trim(),
                &documento,
                tipo,
                telefone,
                email,
                endereco,
            )
            .await?;

        tracing::info!("✅ Cliente {} cadastrado.", cliente.nome);
        Ok(cliente)
    }

    /// Todos os clientes, em ordem alfabética.
    pub async fn listar(&self, pool: &PgPool) -> Result<Vec<Cliente>, AppError> {
        self.repo.listar(pool).await
    }

    pub async fn buscar(&self, pool: &PgPool, id: Uuid) -> Result<Cliente, AppError> {
        self.repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Cliente não encontrado.".to_string()))
    }

    pub async fn atualizar(
        &self,
        pool: &PgPool,
        id: Uuid,
        nome: &str,
        documento: &str,
        tipo: TipoCliente,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
    ) -> Result<Cliente, AppError> {
        let documento = normalizar_documento(documento, tipo)?;
        self.repo
            .atualizar(pool, id, nome.trim(), &documento, tipo, telefone, email, endereco)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Cliente não encontrado.".to_string()))
    }

    pub async fn remover(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.remover(pool, id).await?;
        if removidos == 0 {
            return Err(AppError::NaoEncontrado("Cliente não encontrado.".to_string()));
        }
        Ok(())
    }
}

// Aceita o documento com ou sem máscara e guarda só os dígitos. O tamanho
// precisa bater com o tipo: 11 para CPF, 14 para CNPJ.
fn normalizar_documento(documento: &str, tipo: TipoCliente) -> Result<String, AppError> {
    let digitos: String = documento.chars().filter(|c| c.is_ascii_digit()).collect();
    if digitos.len() != tipo.digitos_documento() {
        return Err(AppError::Validacao(format!(
            "{} deve ter {} dígitos.",
            tipo.rotulo_documento(),
            tipo.digitos_documento()
        )));
    }
    Ok(digitos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_com_mascara_vira_somente_digitos() {
        let documento = normalizar_documento("123.456.789-09", TipoCliente::Fisica).unwrap();
        assert_eq!(documento, "12345678909");
    }

    #[test]
    fn cnpj_com_mascara_vira_somente_digitos() {
        let documento = normalizar_documento("12.345.678/0001-99", TipoCliente::Juridica).unwrap();
        assert_eq!(documento, "12345678000199");
    }

    #[test]
    fn cpf_com_tamanho_errado_falha() {
        let erro = normalizar_documento("123.456.789", TipoCliente::Fisica).unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }

    #[test]
    fn cnpj_com_tamanho_de_cpf_falha() {
        let erro = normalizar_documento("12345678909", TipoCliente::Juridica).unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }
}
