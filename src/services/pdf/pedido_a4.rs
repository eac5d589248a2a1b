// src/services/pdf/pedido_a4.rs
//
// Documento A4 do pedido: faixa de cabeçalho com a identidade da empresa,
// selo de status, tabela de itens com continuação automática em novas
// páginas, banner de total, observações e bloco PIX. A numeração "Página X
// de Y" é carimbada numa segunda passada, quando o total já é conhecido.

use chrono::{DateTime, Utc};
use image::{DynamicImage, Luma, RgbImage};
use printpdf::{Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfPageIndex};
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    common::formato::{
        data_curta, data_curta_instante, data_hora_longa, moeda, quebrar_linhas, slug, truncar,
    },
    models::{
        configuracao::ConfiguracaoCatalogo,
        pedido::{Pedido, StatusPedido},
    },
};

use super::paleta::{Paleta, BRANCO, FUNDO_CLARO, TEXTO};
use super::{erro_pdf, DocumentoGerado, Fontes, Pagina};

const PAGINA_LARGURA: f64 = 210.0;
const PAGINA_ALTURA: f64 = 297.0;
const MARGEM: f64 = 15.0;
const BORDA_DIREITA: f64 = 195.0;

const ALTURA_LINHA: f64 = 7.0;
// Última linha de itens que ainda cabe antes do rodapé.
const LIMITE_TABELA: f64 = 262.0;
const LARGURA_NOME: usize = 40;
const LARGURA_MARCA: usize = 14;

pub fn renderizar(
    pedido: &Pedido,
    config: &ConfiguracaoCatalogo,
    logo: Option<&RgbImage>,
    gerado_em: DateTime<Utc>,
) -> Result<DocumentoGerado, AppError> {
    let paleta = Paleta::derivar(config.cor_primaria.as_deref());
    let (doc, primeira_pagina, primeira_camada) = PdfDocument::new(
        format!("Pedido {}", pedido.numero),
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

    // --- CABEÇALHO ---
    desenhar_cabecalho(&pag, &fontes, &paleta, pedido, config, logo);

    // --- STATUS E VENCIMENTO ---
    let cor_status = match pedido.status {
        StatusPedido::EmAberto => paleta.destaque,
        StatusPedido::Finalizado => paleta.sucesso,
        StatusPedido::Cancelado => paleta.neutra,
    };
    pag.retangulo(MARGEM, 42.0, 48.0, 9.0, cor_status);
    pag.texto_centralizado(
        pedido.status.descricao(),
        9.0,
        MARGEM + 24.0,
        48.0,
        &fontes.negrito,
        BRANCO,
    );
    pag.texto_direita(
        &format!("Vencimento: {}", data_curta(pedido.data_limite_pagamento)),
        10.0,
        BORDA_DIREITA,
        48.0,
        &fontes.negrito,
        paleta.secundaria,
    );

    // --- CLIENTE ---
    pag.texto("CLIENTE", 8.0, MARGEM, 60.0, &fontes.negrito, paleta.secundaria);
    match &pedido.cliente {
        Some(cliente) => {
            pag.texto(&truncar(&cliente.nome, 60), 11.0, MARGEM, 67.0, &fontes.regular, TEXTO);
            pag.texto(
                &format!("{}: {}", cliente.tipo.rotulo_documento(), cliente.documento),
                9.0,
                MARGEM,
                73.0,
                &fontes.regular,
                paleta.neutra,
            );
        }
        None => pag.texto("Consumidor Final", 11.0, MARGEM, 67.0, &fontes.regular, TEXTO),
    }

    // --- TABELA DE ITENS ---
    let mut cursor = 82.0;
    desenhar_cabecalho_tabela(&pag, &fontes, &paleta, cursor);
    cursor += 8.0;

    for (i, item) in pedido.itens.iter().enumerate() {
        if cursor > LIMITE_TABELA {
            pag = nova_pagina(&doc, &mut paginas);
            cursor = 20.0;
            desenhar_cabecalho_tabela(&pag, &fontes, &paleta, cursor);
            cursor += 8.0;
        }
        if i % 2 == 1 {
            pag.retangulo(MARGEM, cursor, 180.0, ALTURA_LINHA, FUNDO_CLARO);
        }
        let base = cursor + 5.0;
        pag.texto(&truncar(&item.nome, LARGURA_NOME), 8.0, 17.0, base, &fontes.regular, TEXTO);
        pag.texto(
            &truncar(item.marca.as_deref().unwrap_or("-"), LARGURA_MARCA),
            8.0,
            95.0,
            base,
            &fontes.regular,
            paleta.neutra,
        );
        pag.texto(&truncar(&item.peso, 12), 8.0, 124.0, base, &fontes.regular, TEXTO);
        pag.texto_direita(&item.quantidade.to_string(), 8.0, 148.0, base, &fontes.regular, TEXTO);
        pag.texto_direita(&moeda(item.preco_unitario), 8.0, 170.0, base, &fontes.regular, TEXTO);
        pag.texto_direita(&moeda(item.preco_total), 8.0, 193.0, base, &fontes.regular, TEXTO);
        cursor += ALTURA_LINHA;
    }

    // --- TOTAIS ---
    cursor += 5.0;
    if cursor + 14.0 > 275.0 {
        pag = nova_pagina(&doc, &mut paginas);
        cursor = 20.0;
    }
    let total_itens: u32 = pedido.itens.iter().map(|item| item.quantidade).sum();
    pag.texto(
        &format!("Total de itens: {}", total_itens),
        9.0,
        MARGEM,
        cursor + 9.0,
        &fontes.regular,
        paleta.neutra,
    );
    pag.retangulo(110.0, cursor, 85.0, 14.0, paleta.primaria);
    pag.texto("TOTAL", 10.0, 115.0, cursor + 9.0, &fontes.negrito, BRANCO);
    pag.texto_direita(&moeda(pedido.valor_total), 13.0, 190.0, cursor + 9.5, &fontes.negrito, BRANCO);
    cursor += 22.0;

    // --- OBSERVAÇÕES ---
    if let Some(observacoes) = &pedido.observacoes {
        if cursor + 12.0 > 275.0 {
            pag = nova_pagina(&doc, &mut paginas);
            cursor = 20.0;
        }
        pag.texto("OBSERVAÇÕES", 8.0, MARGEM, cursor + 4.0, &fontes.negrito, paleta.secundaria);
        cursor += 9.0;
        for linha in quebrar_linhas(observacoes, 110) {
            if cursor > 272.0 {
                pag = nova_pagina(&doc, &mut paginas);
                cursor = 20.0;
            }
            pag.texto(&linha, 8.0, MARGEM, cursor + 3.0, &fontes.regular, TEXTO);
            cursor += 4.5;
        }
        cursor += 4.0;
    }

    // --- PAGAMENTO VIA PIX ---
    if let Some(chave) = config.chave_pix.as_deref().filter(|c| !c.trim().is_empty()) {
        if cursor + 36.0 > 278.0 {
            pag = nova_pagina(&doc, &mut paginas);
            cursor = 20.0;
        }
        pag.texto("PAGAMENTO VIA PIX", 10.0, MARGEM, cursor + 5.0, &fontes.negrito, paleta.primaria);

        // QR Code simples da chave; o pagador confere os dados no aplicativo.
        let codigo = QrCode::new(chave.as_bytes())
            .map_err(|e| AppError::ErroRenderizacao(format!("QR Code da chave PIX: {}", e)))?;
        let qr_imagem = DynamicImage::ImageLuma8(codigo.render::<Luma<u8>>().build()).to_rgb8();
        pag.imagem_quadrada(&qr_imagem, MARGEM, cursor + 8.0, 26.0);

        let rotulo = match config.tipo_chave_pix.as_deref() {
            Some(tipo) => format!("Chave {}: {}", tipo, chave),
            None => format!("Chave: {}", chave),
        };
        pag.texto(&truncar(&rotulo, 70), 9.0, 46.0, cursor + 18.0, &fontes.regular, TEXTO);
        if let Some(nome) = config.nome_empresa.as_deref() {
            pag.texto(nome, 8.0, 46.0, cursor + 24.0, &fontes.regular, paleta.neutra);
        }
    }

    // --- RODAPÉ (segunda passada, com o total de páginas fechado) ---
    let total_paginas = paginas.len();
    let carimbo = format!("Gerado em {}", data_hora_longa(gerado_em));
    for (i, (indice, camada)) in paginas.iter().enumerate() {
        let rodape = Pagina::nova(doc.get_page(*indice).get_layer(*camada), PAGINA_ALTURA);
        rodape.linha(MARGEM, 283.0, BORDA_DIREITA, 283.0, paleta.neutra, 0.3);
        rodape.texto(&carimbo, 7.0, MARGEM, 288.0, &fontes.regular, paleta.neutra);
        rodape.texto_direita(
            &format!("Página {} de {}", i + 1, total_paginas),
            7.0,
            BORDA_DIREITA,
            288.0,
            &fontes.regular,
            paleta.neutra,
        );
    }

    let bytes = doc.save_to_bytes().map_err(erro_pdf)?;
    Ok(DocumentoGerado {
        nome_arquivo: format!("pedido-{}.pdf", slug(&pedido.numero)),
        bytes,
        paginas: total_paginas,
    })
}

fn desenhar_cabecalho(
    pag: &Pagina,
    fontes: &Fontes,
    paleta: &Paleta,
    pedido: &Pedido,
    config: &ConfiguracaoCatalogo,
    logo: Option<&RgbImage>,
) {
    pag.retangulo(0.0, 0.0, PAGINA_LARGURA, 34.0, paleta.primaria);

    let x_texto = match logo {
        Some(imagem) => {
            pag.imagem_quadrada(imagem, MARGEM, 5.0, 24.0);
            MARGEM + 28.0
        }
        None => MARGEM,
    };

    let nome_empresa = config.nome_empresa.as_deref().unwrap_or("Catálogo Premium");
    pag.texto(nome_empresa, 15.0, x_texto, 15.0, &fontes.negrito, BRANCO);

    let mut contato = Vec::new();
    if let Some(telefone) = config.telefone.as_deref() {
        contato.push(telefone);
    }
    if let Some(email) = config.email.as_deref() {
        contato.push(email);
    }
    if !contato.is_empty() {
        pag.texto(&contato.join("  |  "), 8.0, x_texto, 22.0, &fontes.regular, BRANCO);
    }
    if let Some(endereco) = config.endereco.as_deref() {
        pag.texto(&truncar(endereco, 70), 7.0, x_texto, 28.0, &fontes.regular, BRANCO);
    }

    pag.texto_direita("PEDIDO", 13.0, BORDA_DIREITA, 13.0, &fontes.negrito, BRANCO);
    pag.texto_direita(&pedido.numero, 11.0, BORDA_DIREITA, 20.0, &fontes.negrito, BRANCO);
    pag.texto_direita(
        &format!("Emitido em {}", data_curta_instante(pedido.timestamp_criacao)),
        8.0,
        BORDA_DIREITA,
        27.0,
        &fontes.regular,
        BRANCO,
    );
}

// O cabeçalho da tabela se repete no topo de cada continuação.
fn desenhar_cabecalho_tabela(pag: &Pagina, fontes: &Fontes, paleta: &Paleta, topo: f64) {
    pag.retangulo(MARGEM, topo, 180.0, 8.0, paleta.secundaria);
    let base = topo + 5.5;
    pag.texto("PRODUTO", 8.0, 17.0, base, &fontes.negrito, BRANCO);
    pag.texto("MARCA", 8.0, 95.0, base, &fontes.negrito, BRANCO);
    pag.texto("PESO", 8.0, 124.0, base, &fontes.negrito, BRANCO);
    pag.texto_direita("QTD", 8.0, 148.0, base, &fontes.negrito, BRANCO);
    pag.texto_direita("UNITÁRIO", 8.0, 170.0, base, &fontes.negrito, BRANCO);
    pag.texto_direita("TOTAL", 8.0, 193.0, base, &fontes.negrito, BRANCO);
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

    fn pedido_de_teste(n_itens: usize) -> Pedido {
        let itens = (0..n_itens)
            .map(|i| item(&format!("Produto {}", i + 1), 2, "7.50"))
            .collect();
        Pedido::novo(
            "PED-2025-001".to_string(),
            NovoPedido {
                cliente: None,
                itens,
                data_limite_pagamento: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                observacoes: Some("Entregar na parte da manhã.".to_string()),
            },
        )
    }

    fn config_de_teste() -> ConfiguracaoCatalogo {
        ConfiguracaoCatalogo {
            nome_empresa: Some("Distribuidora Aurora".to_string()),
            cor_primaria: Some("#1F6F43".to_string()),
            telefone: Some("(11) 98888-0000".to_string()),
            chave_pix: Some("pix@aurora.com.br".to_string()),
            tipo_chave_pix: Some("E-mail".to_string()),
            ..Default::default()
        }
    }

    fn instante() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-10T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn pedido_pequeno_cabe_em_uma_pagina() {
        let documento =
            renderizar(&pedido_de_teste(2), &config_de_teste(), None, instante()).unwrap();

        assert_eq!(documento.paginas, 1);
        assert_eq!(documento.nome_arquivo, "pedido-ped-2025-001.pdf");
        assert!(documento.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pedido_longo_continua_na_segunda_pagina() {
        let documento =
            renderizar(&pedido_de_teste(40), &config_de_teste(), None, instante()).unwrap();

        assert!(documento.paginas >= 2);
    }

    #[test]
    fn mesmo_pedido_rende_o_mesmo_documento() {
        let pedido = pedido_de_teste(3);
        let config = config_de_teste();

        let primeiro = renderizar(&pedido, &config, None, instante()).unwrap();
        let segundo = renderizar(&pedido, &config, None, instante()).unwrap();

        assert_eq!(primeiro.paginas, segundo.paginas);
        assert_eq!(primeiro.bytes.len(), segundo.bytes.len());
    }

    #[test]
    fn logo_embutido_nao_altera_a_estrutura() {
        let logo = image::RgbImage::from_pixel(512, 512, image::Rgb([200, 30, 30]));
        let documento =
            renderizar(&pedido_de_teste(2), &config_de_teste(), Some(&logo), instante()).unwrap();

        assert_eq!(documento.paginas, 1);
        assert!(documento.bytes.len() > 2_000);
    }
}
