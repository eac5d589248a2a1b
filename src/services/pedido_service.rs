// src/services/pedido_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::formato::moeda,
    db::{ClienteRepository, PedidoRepository},
    models::pedido::{ClienteResumo, EdicaoPedido, ItemPedido, NovoPedido, Pedido, StatusPedido},
    services::NumeracaoService,
};

// Ciclo de vida dos pedidos. Além do banco, o serviço mantém uma cópia em
// memória da listagem, do mais recente para o mais antigo: leituras pontuais
// saem dela e cada mutação a atualiza assim que o banco confirma. O lock
// nunca atravessa um await.
#[derive(Clone)]
pub struct PedidoService {
    repo: PedidoRepository,
    cliente_repo: ClienteRepository,
    numeracao: NumeracaoService,
    cache: Arc<RwLock<Vec<Pedido>>>,
}

impl PedidoService {
    pub fn new(
        repo: PedidoRepository,
        cliente_repo: ClienteRepository,
        numeracao: NumeracaoService,
    ) -> Self {
        Self {
            repo,
            cliente_repo,
            numeracao,
            cache: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // --- CRIAÇÃO ---

    pub async fn criar(
        &self,
        pool: &PgPool,
        cliente_id: Option<Uuid>,
        sem_cliente: bool,
        itens: Vec<ItemPedido>,
        data_limite_pagamento: NaiveDate,
        observacoes: Option<String>,
    ) -> Result<Pedido, AppError> {
        if cliente_id.is_none() && !sem_cliente {
            return Err(AppError::Validacao(
                "Informe o cliente ou marque a venda como sem cliente.".to_string(),
            ));
        }

        let cliente = match cliente_id {
            Some(id) => Some((id, self.resumo_do_cliente(pool, id).await?)),
            None => None,
        };

        // 1. Reserva o número. O incremento da sequência é independente da
        //    gravação do pedido e não volta atrás se ela falhar.
        let numero = self.numeracao.proximo_numero(pool).await;

        // 2. Monta o pedido já com os totais recalculados e grava.
        let pedido = Pedido::novo(
            numero,
            NovoPedido {
                cliente,
                itens,
                data_limite_pagamento,
                observacoes,
            },
        );
        self.repo.inserir(pool, &pedido).await?;

        // 3. Só depois do banco confirmar o pedido entra na lista em memória.
        self.cache.write().await.insert(0, pedido.clone());

        tracing::info!(
            "✅ Pedido {} criado ({}).",
            pedido.numero,
            moeda(pedido.valor_total)
        );
        Ok(pedido)
    }

    // --- LEITURA ---

    /// Busca tudo no banco e substitui a cópia em memória. A ordenação do
    /// mais recente para o mais antigo é refeita aqui a cada chamada.
    pub async fn listar(&self, pool: &PgPool) -> Result<Vec<Pedido>, AppError> {
        let mut pedidos = self.repo.listar(pool).await?;
        pedidos.sort_by(|a, b| b.timestamp_criacao.cmp(&a.timestamp_criacao));
        *self.cache.write().await = pedidos.clone();
        Ok(pedidos)
    }

    /// Consulta pontual na cópia em memória; nunca falha.
    pub async fn obter(&self, id: Uuid) -> Option<Pedido> {
        self.cache.read().await.iter().find(|p| p.id == id).cloned()
    }

    // Leitura para mutação: tenta a memória e cai para o banco, que é a
    // fonte da verdade quando a lista ainda não foi carregada.
    pub async fn carregar(&self, pool: &PgPool, id: Uuid) -> Result<Pedido, AppError> {
        if let Some(pedido) = self.obter(id).await {
            return Ok(pedido);
        }
        self.repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Pedido não encontrado.".to_string()))
    }

    // --- MUTAÇÕES ---

    pub async fn atualizar(
        &self,
        pool: &PgPool,
        id: Uuid,
        cliente_id: Option<Uuid>,
        remover_cliente: bool,
        itens: Option<Vec<ItemPedido>>,
        data_limite_pagamento: Option<NaiveDate>,
        observacoes: Option<String>,
    ) -> Result<Pedido, AppError> {
        let mut pedido = self.carregar(pool, id).await?;

        let cliente = match cliente_id {
            Some(novo_id) => Some((novo_id, self.resumo_do_cliente(pool, novo_id).await?)),
            None => None,
        };
        pedido.aplicar_edicao(EdicaoPedido {
            cliente,
            remover_cliente,
            itens,
            data_limite_pagamento,
            observacoes,
        })?;

        self.persistir(pool, pedido).await
    }

    pub async fn finalizar(&self, pool: &PgPool, id: Uuid) -> Result<Pedido, AppError> {
        let mut pedido = self.carregar(pool, id).await?;
        pedido.finalizar()?;
        let pedido = self.persistir(pool, pedido).await?;

        tracing::info!(
            "✅ Pedido {} finalizado ({}).",
            pedido.numero,
            moeda(pedido.valor_total)
        );
        Ok(pedido)
    }

    pub async fn cancelar(&self, pool: &PgPool, id: Uuid) -> Result<Pedido, AppError> {
        let mut pedido = self.carregar(pool, id).await?;
        let era_finalizado = pedido.status == StatusPedido::Finalizado;
        pedido.cancelar()?;
        let pedido = self.persistir(pool, pedido).await?;

        if era_finalizado {
            // Estorno pós-venda; fica registrado fora do fluxo normal.
            tracing::warn!("Pedido {} cancelado após a finalização.", pedido.numero);
        }
        Ok(pedido)
    }

    /// Exclusão vale para qualquer status. O número do pedido se aposenta
    /// junto: a sequência nunca anda para trás.
    pub async fn deletar(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.remover(pool, id).await?;
        if removidos == 0 {
            return Err(AppError::NaoEncontrado("Pedido não encontrado.".to_string()));
        }
        self.cache.write().await.retain(|p| p.id != id);
        Ok(())
    }

    // Regrava o pedido inteiro e espelha a mudança na cópia em memória.
    async fn persistir(&self, pool: &PgPool, pedido: Pedido) -> Result<Pedido, AppError> {
        let atualizado = self
            .repo
            .atualizar(pool, &pedido)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Pedido não encontrado.".to_string()))?;

        let mut cache = self.cache.write().await;
        match cache.iter_mut().find(|p| p.id == atualizado.id) {
            Some(entrada) => *entrada = atualizado.clone(),
            None => cache.insert(0, atualizado.clone()),
        }
        Ok(atualizado)
    }

    async fn resumo_do_cliente(&self, pool: &PgPool, id: Uuid) -> Result<ClienteResumo, AppError> {
        let cliente = self
            .cliente_repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Cliente não encontrado.".to_string()))?;
        Ok(cliente.resumo())
    }
}
