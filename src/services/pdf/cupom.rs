// src/services/pdf/cupom.rs
//
// Cupom não fiscal para impressora térmica de 58mm ou 80mm: monocromático,
// fonte de passo fixo e uma única página cuja altura é calculada antes de
// desenhar, a partir do plano de linhas.

use chrono::{DateTime, Utc};
use printpdf::{Mm, PdfDocument};

use crate::{
    common::error::AppError,
    common::formato::{data_curta, data_hora_longa, moeda, quebrar_linhas, slug, truncar},
    models::{configuracao::ConfiguracaoCatalogo, pedido::Pedido},
};

use super::paleta::PRETO;
use super::{erro_pdf, largura_texto_mono, DocumentoGerado, Fontes, Pagina, MM_POR_PONTO};

const MARGEM_CUPOM: f64 = 4.0;
const MARGEM_TOPO: f64 = 6.0;
const MARGEM_FUNDO: f64 = 8.0;

#[derive(Debug)]
pub enum LinhaCupom {
    Texto {
        texto: String,
        tamanho: f64,
        negrito: bool,
        centrado: bool,
    },
    Duplo {
        esquerda: String,
        direita: String,
        tamanho: f64,
        negrito: bool,
    },
    Separador,
    Espaco(f64),
}

impl LinhaCupom {
    fn altura(&self) -> f64 {
        match self {
            LinhaCupom::Texto { tamanho, .. } => tamanho * 0.5,
            LinhaCupom::Duplo { tamanho, .. } => tamanho * 0.5,
            LinhaCupom::Separador => 3.5,
            LinhaCupom::Espaco(mm) => *mm,
        }
    }
}

// Quantos caracteres de Courier cabem na largura útil do papel.
fn colunas_para(largura_mm: f64, tamanho: f64) -> usize {
    ((largura_mm - 2.0 * MARGEM_CUPOM) / (0.6 * tamanho * MM_POR_PONTO)) as usize
}

// Garante que a linha caiba no papel; o excesso vira reticências.
fn ajustar(texto: &str, colunas: usize) -> String {
    if texto.chars().count() <= colunas {
        texto.to_string()
    } else {
        truncar(texto, colunas.saturating_sub(3))
    }
}

pub fn montar_linhas(
    pedido: &Pedido,
    config: &ConfiguracaoCatalogo,
    largura_mm: f64,
    gerado_em: DateTime<Utc>,
) -> Vec<LinhaCupom> {
    let mut linhas = Vec::new();
    let col7 = colunas_para(largura_mm, 7.0);

    let texto = |texto: String, tamanho: f64, negrito: bool, centrado: bool| LinhaCupom::Texto {
        texto: ajustar(&texto, colunas_para(largura_mm, tamanho)),
        tamanho,
        negrito,
        centrado,
    };

    // --- CABEÇALHO ---
    let empresa = config.nome_empresa.as_deref().unwrap_or("Catálogo Premium");
    linhas.push(texto(empresa.to_string(), 9.0, true, true));
    if let Some(telefone) = config.telefone.as_deref() {
        linhas.push(texto(telefone.to_string(), 7.0, false, true));
    }
    if let Some(endereco) = config.endereco.as_deref() {
        linhas.push(texto(endereco.to_string(), 7.0, false, true));
    }
    linhas.push(LinhaCupom::Separador);

    linhas.push(texto(format!("PEDIDO {}", pedido.numero), 8.0, true, true));
    linhas.push(texto(data_hora_longa(pedido.timestamp_criacao), 7.0, false, true));
    linhas.push(LinhaCupom::Separador);

    // --- CLIENTE ---
    match &pedido.cliente {
        Some(cliente) => {
            linhas.push(texto(format!("Cliente: {}", cliente.nome), 7.0, false, false));
            linhas.push(texto(
                format!("{}: {}", cliente.tipo.rotulo_documento(), cliente.documento),
                7.0,
                false,
                false,
            ));
        }
        None => linhas.push(texto("Cliente: Consumidor Final".to_string(), 7.0, false, false)),
    }
    linhas.push(LinhaCupom::Separador);

    // --- ITENS ---
    for item in &pedido.itens {
        linhas.push(texto(item.nome.clone(), 7.0, true, false));

        let detalhe = match item.marca.as_deref() {
            Some(marca) => format!("{} {}", marca, item.peso),
            None => item.peso.clone(),
        };
        if !detalhe.trim().is_empty() {
            linhas.push(texto(detalhe, 7.0, false, false));
        }

        let valor = moeda(item.preco_total);
        let compra = format!("{} x {}", item.quantidade, moeda(item.preco_unitario));
        linhas.push(LinhaCupom::Duplo {
            esquerda: ajustar(&compra, col7.saturating_sub(valor.chars().count() + 1)),
            direita: valor,
            tamanho: 7.0,
            negrito: false,
        });
    }
    linhas.push(LinhaCupom::Separador);

    // --- TOTAL ---
    linhas.push(LinhaCupom::Duplo {
        esquerda: "TOTAL".to_string(),
        direita: moeda(pedido.valor_total),
        tamanho: 9.0,
        negrito: true,
    });
    linhas.push(LinhaCupom::Espaco(1.0));
    linhas.push(texto(
        format!("Vencimento: {}", data_curta(pedido.data_limite_pagamento)),
        7.0,
        false,
        false,
    ));
    linhas.push(texto(format!("Status: {}", pedido.status.descricao()), 7.0, false, false));

    if let Some(observacoes) = &pedido.observacoes {
        linhas.push(LinhaCupom::Separador);
        linhas.push(texto("Obs:".to_string(), 7.0, true, false));
        for linha in quebrar_linhas(observacoes, col7) {
            linhas.push(texto(linha, 7.0, false, false));
        }
    }

    linhas.push(LinhaCupom::Espaco(2.0));
    linhas.push(texto(
        format!("Gerado em {}", data_hora_longa(gerado_em)),
        6.5,
        false,
        true,
    ));

    linhas
}

pub fn renderizar(
    pedido: &Pedido,
    config: &ConfiguracaoCatalogo,
    largura_mm: u32,
    gerado_em: DateTime<Utc>,
) -> Result<DocumentoGerado, AppError> {
    let largura = largura_mm as f64;
    let linhas = montar_linhas(pedido, config, largura, gerado_em);
    let altura =
        MARGEM_TOPO + linhas.iter().map(LinhaCupom::altura).sum::<f64>() + MARGEM_FUNDO;

    let (doc, pagina, camada) = PdfDocument::new(
        format!("Cupom {}", pedido.numero),
        Mm(largura as f32),
        Mm(altura as f32),
        "Conteúdo",
    );
    let fontes = Fontes::carregar_monoespacada(&doc)?;
    let pag = Pagina::nova(doc.get_page(pagina).get_layer(camada), altura);

    let mut cursor = MARGEM_TOPO;
    for linha in &linhas {
        match linha {
            LinhaCupom::Texto {
                texto,
                tamanho,
                negrito,
                centrado,
            } => {
                let fonte = if *negrito { &fontes.negrito } else { &fontes.regular };
                let x = if *centrado {
                    (largura - largura_texto_mono(texto, *tamanho)) / 2.0
                } else {
                    MARGEM_CUPOM
                };
                pag.texto(texto, *tamanho, x, cursor + *tamanho * MM_POR_PONTO, fonte, PRETO);
            }
            LinhaCupom::Duplo {
                esquerda,
                direita,
                tamanho,
                negrito,
            } => {
                let fonte = if *negrito { &fontes.negrito } else { &fontes.regular };
                let base = cursor + *tamanho * MM_POR_PONTO;
                pag.texto(esquerda, *tamanho, MARGEM_CUPOM, base, fonte, PRETO);
                let x = largura - MARGEM_CUPOM - largura_texto_mono(direita, *tamanho);
                pag.texto(direita, *tamanho, x, base, fonte, PRETO);
            }
            LinhaCupom::Separador => {
                pag.linha_tracejada(
                    MARGEM_CUPOM,
                    cursor + 1.8,
                    largura - MARGEM_CUPOM,
                    cursor + 1.8,
                    PRETO,
                    0.25,
                );
            }
            LinhaCupom::Espaco(_) => {}
        }
        cursor += linha.altura();
    }

    let bytes = doc.save_to_bytes().map_err(erro_pdf)?;
    Ok(DocumentoGerado {
        nome_arquivo: format!("cupom-{}mm-{}.pdf", largura_mm, slug(&pedido.numero)),
        bytes,
        paginas: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::pedido::{ItemPedido, NovoPedido};

    fn item(nome: &str, quantidade: u32, preco: &str) -> ItemPedido {
        ItemPedido {
            produto_id: Uuid::new_v4(),
            nome: nome.to_string(),
            peso: "5kg".to_string(),
            quantidade,
            preco_unitario: preco.parse().unwrap(),
            preco_total: Decimal::ZERO,
            marca: Some("Premium".to_string()),
        }
    }

    fn pedido_de_teste() -> Pedido {
        Pedido::novo(
            "PED-2025-001".to_string(),
            NovoPedido {
                cliente: None,
                itens: vec![
                    item("Arroz Agulhinha Tipo 1 Pacote Extra Grande", 2, "10.00"),
                    item("Feijão Carioca", 1, "5.00"),
                ],
                data_limite_pagamento: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                observacoes: Some("Conferir as validades na entrega.".to_string()),
            },
        )
    }

    fn instante() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-10T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn plano_inclui_cabecalho_e_total() {
        let linhas = montar_linhas(
            &pedido_de_teste(),
            &ConfiguracaoCatalogo::default(),
            58.0,
            instante(),
        );

        match &linhas[0] {
            LinhaCupom::Texto { texto, negrito, centrado, .. } => {
                assert_eq!(texto, "Catálogo Premium");
                assert!(*negrito && *centrado);
            }
            outra => panic!("primeira linha deveria ser o nome da empresa: {:?}", outra),
        }

        let total = linhas.iter().find_map(|linha| match linha {
            LinhaCupom::Duplo { esquerda, direita, .. } if esquerda == "TOTAL" => Some(direita.clone()),
            _ => None,
        });
        assert_eq!(total.as_deref(), Some("R$ 25,00"));
    }

    #[test]
    fn todas_as_linhas_cabem_no_papel_de_58mm() {
        let linhas = montar_linhas(
            &pedido_de_teste(),
            &ConfiguracaoCatalogo::default(),
            58.0,
            instante(),
        );

        for linha in &linhas {
            match linha {
                LinhaCupom::Texto { texto, tamanho, .. } => {
                    assert!(
                        texto.chars().count() <= colunas_para(58.0, *tamanho),
                        "linha estoura o papel: {:?}",
                        texto
                    );
                }
                LinhaCupom::Duplo { esquerda, direita, tamanho, .. } => {
                    let ocupado = esquerda.chars().count() + 1 + direita.chars().count();
                    assert!(ocupado <= colunas_para(58.0, *tamanho));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn mais_itens_geram_mais_linhas() {
        let pequeno = pedido_de_teste();
        let mut grande = pedido_de_teste();
        grande.itens.extend((0..5).map(|i| item(&format!("Produto {}", i), 1, "3.00")));
        grande.recalcular_total();

        let config = ConfiguracaoCatalogo::default();
        assert!(
            montar_linhas(&grande, &config, 58.0, instante()).len()
                > montar_linhas(&pequeno, &config, 58.0, instante()).len()
        );
    }

    #[test]
    fn renderiza_uma_pagina_nas_duas_larguras() {
        let pedido = pedido_de_teste();
        let config = ConfiguracaoCatalogo::default();

        for largura in [58u32, 80u32] {
            let documento = renderizar(&pedido, &config, largura, instante()).unwrap();
            assert_eq!(documento.paginas, 1);
            assert_eq!(
                documento.nome_arquivo,
                format!("cupom-{}mm-ped-2025-001.pdf", largura)
            );
            assert!(documento.bytes.starts_with(b"%PDF"));
        }
    }
}
