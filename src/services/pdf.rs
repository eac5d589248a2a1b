// src/services/pdf.rs
//
// Base comum dos três documentos: fontes embutidas, cores e uma camada fina
// sobre o printpdf que mede o Y a partir do topo da página, que é como os
// layouts são pensados.

pub mod catalogo;
pub mod cupom;
pub mod imagem;
pub mod paleta;
pub mod pedido_a4;

use image::{DynamicImage, RgbImage};
use printpdf::{
    path::PaintMode, BuiltinFont, Color, ImageTransform, IndirectFontRef, Line, LineDashPattern,
    Mm, PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};

use crate::common::error::AppError;
use paleta::CorRgb;

pub const MM_POR_PONTO: f64 = 25.4 / 72.0;

// Binário pronto para download, com o nome que o navegador deve sugerir.
pub struct DocumentoGerado {
    pub nome_arquivo: String,
    pub bytes: Vec<u8>,
    pub paginas: usize,
}

pub fn erro_pdf(e: printpdf::Error) -> AppError {
    AppError::ErroRenderizacao(e.to_string())
}

pub struct Fontes {
    pub regular: IndirectFontRef,
    pub negrito: IndirectFontRef,
}

impl Fontes {
    pub fn carregar(doc: &PdfDocumentReference) -> Result<Self, AppError> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(erro_pdf)?,
            negrito: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(erro_pdf)?,
        })
    }

    // Cupom térmico usa fonte de passo fixo.
    pub fn carregar_monoespacada(doc: &PdfDocumentReference) -> Result<Self, AppError> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Courier).map_err(erro_pdf)?,
            negrito: doc
                .add_builtin_font(BuiltinFont::CourierBold)
                .map_err(erro_pdf)?,
        })
    }
}

// As fontes embutidas não expõem métricas, então a largura é estimada: a
// Helvetica fica perto de meio em por caractere, a Courier tem passo fixo
// de 0,6 em.
pub fn largura_texto(texto: &str, tamanho: f64) -> f64 {
    texto.chars().count() as f64 * 0.5 * tamanho * MM_POR_PONTO
}

pub fn largura_texto_mono(texto: &str, tamanho: f64) -> f64 {
    texto.chars().count() as f64 * 0.6 * tamanho * MM_POR_PONTO
}

fn cor(c: CorRgb) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

pub struct Pagina {
    layer: PdfLayerReference,
    altura: f64,
}

impl Pagina {
    pub fn nova(layer: PdfLayerReference, altura: f64) -> Self {
        Self { layer, altura }
    }

    // O printpdf mede do rodapé para cima; aqui convertemos.
    fn y(&self, topo: f64) -> Mm {
        Mm((self.altura - topo) as f32)
    }

    pub fn texto(
        &self,
        texto: &str,
        tamanho: f64,
        x: f64,
        topo: f64,
        fonte: &IndirectFontRef,
        c: CorRgb,
    ) {
        self.layer.set_fill_color(cor(c));
        self.layer
            .use_text(texto, tamanho as f32, Mm(x as f32), self.y(topo), fonte);
    }

    pub fn texto_direita(
        &self,
        texto: &str,
        tamanho: f64,
        x_fim: f64,
        topo: f64,
        fonte: &IndirectFontRef,
        c: CorRgb,
    ) {
        let x = x_fim - largura_texto(texto, tamanho);
        self.texto(texto, tamanho, x, topo, fonte, c);
    }

    pub fn texto_centralizado(
        &self,
        texto: &str,
        tamanho: f64,
        x_centro: f64,
        topo: f64,
        fonte: &IndirectFontRef,
        c: CorRgb,
    ) {
        let x = x_centro - largura_texto(texto, tamanho) / 2.0;
        self.texto(texto, tamanho, x, topo, fonte, c);
    }

    pub fn retangulo(&self, x: f64, topo: f64, largura: f64, altura: f64, c: CorRgb) {
        self.layer.set_fill_color(cor(c));
        let rect = Rect::new(
            Mm(x as f32),
            self.y(topo + altura),
            Mm((x + largura) as f32),
            self.y(topo),
        )
        .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    pub fn contorno(
        &self,
        x: f64,
        topo: f64,
        largura: f64,
        altura: f64,
        c: CorRgb,
        espessura: f64,
    ) {
        self.layer.set_outline_color(cor(c));
        self.layer.set_outline_thickness(espessura as f32);
        let rect = Rect::new(
            Mm(x as f32),
            self.y(topo + altura),
            Mm((x + largura) as f32),
            self.y(topo),
        )
        .with_mode(PaintMode::Stroke);
        self.layer.add_rect(rect);
    }

    pub fn linha(&self, x1: f64, topo1: f64, x2: f64, topo2: f64, c: CorRgb, espessura: f64) {
        self.layer.set_outline_color(cor(c));
        self.layer.set_outline_thickness(espessura as f32);
        let linha = Line {
            points: vec![
                (Point::new(Mm(x1 as f32), self.y(topo1)), false),
                (Point::new(Mm(x2 as f32), self.y(topo2)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(linha);
    }

    pub fn linha_tracejada(
        &self,
        x1: f64,
        topo1: f64,
        x2: f64,
        topo2: f64,
        c: CorRgb,
        espessura: f64,
    ) {
        self.layer.set_line_dash_pattern(LineDashPattern {
            dash_1: Some(2),
            ..Default::default()
        });
        self.linha(x1, topo1, x2, topo2, c, espessura);
        self.layer.set_line_dash_pattern(LineDashPattern::default());
    }

    // Os tiles chegam sempre quadrados, então um único lado em milímetros
    // define o dpi que faz a imagem caber exatamente no espaço.
    pub fn imagem_quadrada(&self, imagem: &RgbImage, x: f64, topo: f64, lado: f64) {
        let dpi = imagem.width() as f64 * 25.4 / lado;
        let objeto = printpdf::Image::from_dynamic_image(&DynamicImage::ImageRgb8(imagem.clone()));
        objeto.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x as f32)),
                translate_y: Some(self.y(topo + lado)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }
}
