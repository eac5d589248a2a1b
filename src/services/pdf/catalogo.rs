// src/services/pdf/catalogo.rs
//
// Catálogo de produtos em A4: grade de 2x2 cards por página, cada card com o
// tile quadrado da foto (ou o quadro "sem imagem"), nome, marca, peso e
// preços. O cabeçalho da empresa se repete em todas as páginas.

use chrono::{DateTime, Utc};
use image::RgbImage;
use printpdf::{Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfPageIndex};

use crate::{
    common::error::AppError,
    common::formato::{data_curta_instante, data_hora_longa, moeda, truncar},
    models::{configuracao::ConfiguracaoCatalogo, produto::Produto},
};

use super::imagem::ImagemTile;
use super::paleta::{Paleta, BRANCO, FUNDO_CLARO, TEXTO};
use super::{erro_pdf, DocumentoGerado, Fontes, Pagina};

const PAGINA_LARGURA: f64 = 210.0;
const PAGINA_ALTURA: f64 = 297.0;
const MARGEM: f64 = 15.0;
const BORDA_DIREITA: f64 = 195.0;

pub const PRODUTOS_POR_PAGINA: usize = 4;
const COLUNAS: usize = 2;
const CARD_LARGURA: f64 = 87.0;
const CARD_ALTURA: f64 = 100.0;
const ESPACO_CARDS: f64 = 6.0;
const GRADE_TOPO: f64 = 38.0;
const LADO_TILE_MM: f64 = 56.0;

// Produto já com a imagem resolvida; a busca acontece antes, no serviço.
pub struct ProdutoCatalogo {
    pub produto: Produto,
    pub tile: ImagemTile,
}

pub fn renderizar(
    produtos: &[ProdutoCatalogo],
    config: &ConfiguracaoCatalogo,
    logo: Option<&RgbImage>,
    filtrado: bool,
    gerado_em: DateTime<Utc>,
) -> Result<DocumentoGerado, AppError> {
    let paleta = Paleta::derivar(config.cor_primaria.as_deref());
    let (doc, primeira_pagina, primeira_camada) = PdfDocument::new(
        "Catálogo de Produtos",
        Mm(PAGINA_LARGURA as f32),
        Mm(PAGINA_ALTURA as f32),
        "Conteúdo",
    );
    let fontes = Fontes::carregar(&doc)?;

    let mut paginas = vec![(primeira_pagina, primeira_camada)];
    let mut pag = Pagina::nova(
        doc.get_page(primeira_pagina).get_layer(primeira_camada),
        PAGINA_ALTURA,
    );
    desenhar_moldura(&pag, &fontes, &paleta, config, logo, gerado_em);

    if produtos.is_empty() {
        pag.texto_centralizado(
            "Nenhum produto para exibir.",
            11.0,
            PAGINA_LARGURA / 2.0,
            140.0,
            &fontes.regular,
            paleta.neutra,
        );
    }

    for (i, item) in produtos.iter().enumerate() {
        if i % PRODUTOS_POR_PAGINA == 0 && i > 0 {
            pag = nova_pagina(&doc, &mut paginas);
            desenhar_moldura(&pag, &fontes, &paleta, config, logo, gerado_em);
        }

        let posicao = i % PRODUTOS_POR_PAGINA;
        let coluna = posicao % COLUNAS;
        let linha = posicao / COLUNAS;
        let x = MARGEM + coluna as f64 * (CARD_LARGURA + ESPACO_CARDS);
        let topo = GRADE_TOPO + linha as f64 * (CARD_ALTURA + ESPACO_CARDS);
        desenhar_card(&pag, &fontes, &paleta, item, x, topo);
    }

    let total_paginas = paginas.len();
    let bytes = doc.save_to_bytes().map_err(erro_pdf)?;
    let sufixo = if filtrado { "-filtrado" } else { "" };
    Ok(DocumentoGerado {
        nome_arquivo: format!("catalogo-produtos-premium{}.pdf", sufixo),
        bytes,
        paginas: total_paginas,
    })
}

// Cabeçalho e rodapé fixos, repetidos em cada página do catálogo.
fn desenhar_moldura(
    pag: &Pagina,
    fontes: &Fontes,
    paleta: &Paleta,
    config: &ConfiguracaoCatalogo,
    logo: Option<&RgbImage>,
    gerado_em: DateTime<Utc>,
) {
    pag.retangulo(0.0, 0.0, PAGINA_LARGURA, 30.0, paleta.primaria);

    let x_texto = match logo {
        Some(imagem) => {
            pag.imagem_quadrada(imagem, MARGEM, 5.0, 20.0);
            MARGEM + 24.0
        }
        None => MARGEM,
    };
    let nome_empresa = config.nome_empresa.as_deref().unwrap_or("Catálogo Premium");
    pag.texto(nome_empresa, 15.0, x_texto, 14.0, &fontes.negrito, BRANCO);
    pag.texto("Catálogo de Produtos", 9.0, x_texto, 22.0, &fontes.regular, BRANCO);
    pag.texto_direita(
        &data_curta_instante(gerado_em),
        8.0,
        BORDA_DIREITA,
        14.0,
        &fontes.regular,
        BRANCO,
    );

    pag.linha(MARGEM, 282.0, BORDA_DIREITA, 282.0, paleta.neutra, 0.3);
    let mut contato = Vec::new();
    if let Some(telefone) = config.telefone.as_deref() {
        contato.push(telefone);
    }
    if let Some(email) = config.email.as_deref() {
        contato.push(email);
    }
    if !contato.is_empty() {
        pag.texto(&contato.join("  |  "), 7.0, MARGEM, 287.5, &fontes.regular, paleta.neutra);
    }
    pag.texto_direita(
        &format!("Gerado em {}", data_hora_longa(gerado_em)),
        7.0,
        BORDA_DIREITA,
        287.5,
        &fontes.regular,
        paleta.neutra,
    );
}

fn desenhar_card(
    pag: &Pagina,
    fontes: &Fontes,
    paleta: &Paleta,
    item: &ProdutoCatalogo,
    x: f64,
    topo: f64,
) {
    pag.contorno(x, topo, CARD_LARGURA, CARD_ALTURA, paleta.neutra, 0.4);

    let tile_x = x + (CARD_LARGURA - LADO_TILE_MM) / 2.0;
    match &item.tile {
        ImagemTile::Pronta(tile) => pag.imagem_quadrada(tile, tile_x, topo + 6.0, LADO_TILE_MM),
        ImagemTile::Indisponivel => {
            pag.retangulo(tile_x, topo + 6.0, LADO_TILE_MM, LADO_TILE_MM, FUNDO_CLARO);
            pag.texto_centralizado(
                "Sem imagem",
                8.0,
                x + CARD_LARGURA / 2.0,
                topo + 6.0 + LADO_TILE_MM / 2.0,
                &fontes.regular,
                paleta.neutra,
            );
        }
    }

    let produto = &item.produto;
    pag.texto(&truncar(&produto.nome, 26), 9.5, x + 4.0, topo + 72.0, &fontes.negrito, TEXTO);

    let detalhe = match produto.marca.as_deref() {
        Some(marca) => format!("{} - {}", marca, produto.peso),
        None => produto.peso.clone(),
    };
    pag.texto(&truncar(&detalhe, 34), 7.5, x + 4.0, topo + 78.0, &fontes.regular, paleta.neutra);

    pag.texto(
        &moeda(produto.preco_unitario),
        11.0,
        x + 4.0,
        topo + 88.0,
        &fontes.negrito,
        paleta.destaque,
    );

    if let (Some(preco_fardo), Some(qtd_fardo)) = (produto.preco_fardo, produto.qtd_fardo) {
        pag.texto(
            &format!("Fardo c/ {}: {}", qtd_fardo, moeda(preco_fardo)),
            7.0,
            x + 4.0,
            topo + 94.0,
            &fontes.regular,
            paleta.secundaria,
        );
    }
}

fn nova_pagina(
    doc: &PdfDocumentReference,
    paginas: &mut Vec<(PdfPageIndex, PdfLayerIndex)>,
) -> Pagina {
    let (indice, camada) =
        doc.add_page(Mm(PAGINA_LARGURA as f32), Mm(PAGINA_ALTURA as f32), "Conteúdo");
    paginas.push((indice, camada));
    Pagina::nova(doc.get_page(indice).get_layer(camada), PAGINA_ALTURA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn produto_de_teste(nome: &str) -> Produto {
        Produto {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            peso: "5kg".to_string(),
            preco_unitario: Decimal::new(2590, 2),
            preco_fardo: Some(Decimal::new(14900, 2)),
            qtd_fardo: Some(6),
            marca: Some("Premium".to_string()),
            image_path: None,
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        }
    }

    fn itens_de_teste(n: usize) -> Vec<ProdutoCatalogo> {
        (0..n)
            .map(|i| ProdutoCatalogo {
                produto: produto_de_teste(&format!("Produto {}", i + 1)),
                tile: ImagemTile::Indisponivel,
            })
            .collect()
    }

    fn instante() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-10T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn quatro_produtos_cabem_em_uma_pagina() {
        let documento = renderizar(
            &itens_de_teste(4),
            &ConfiguracaoCatalogo::default(),
            None,
            false,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.paginas, 1);
        assert_eq!(documento.nome_arquivo, "catalogo-produtos-premium.pdf");
    }

    #[test]
    fn quinto_produto_abre_a_segunda_pagina() {
        let documento = renderizar(
            &itens_de_teste(5),
            &ConfiguracaoCatalogo::default(),
            None,
            false,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.paginas, 2);
    }

    #[test]
    fn nove_produtos_ocupam_tres_paginas() {
        let documento = renderizar(
            &itens_de_teste(9),
            &ConfiguracaoCatalogo::default(),
            None,
            false,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.paginas, 3);
    }

    #[test]
    fn catalogo_filtrado_leva_sufixo_no_nome() {
        let documento = renderizar(
            &itens_de_teste(1),
            &ConfiguracaoCatalogo::default(),
            None,
            true,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.nome_arquivo, "catalogo-produtos-premium-filtrado.pdf");
    }

    #[test]
    fn catalogo_vazio_rende_o_aviso_em_uma_pagina() {
        let documento = renderizar(
            &[],
            &ConfiguracaoCatalogo::default(),
            None,
            false,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.paginas, 1);
        assert!(documento.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn tile_com_imagem_e_embutido_sem_erro() {
        let tile = RgbImage::from_pixel(512, 512, image::Rgb([30, 90, 200]));
        let itens = vec![ProdutoCatalogo {
            produto: produto_de_teste("Produto com foto"),
            tile: ImagemTile::Pronta(tile),
        }];

        let documento = renderizar(
            &itens,
            &ConfiguracaoCatalogo::default(),
            None,
            false,
            instante(),
        )
        .unwrap();

        assert_eq!(documento.paginas, 1);
        assert!(documento.bytes.len() > 2_000);
    }
}
