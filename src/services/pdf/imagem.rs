// src/services/pdf/imagem.rs
//
// Busca as imagens referenciadas pelos cadastros (upload local ou URL) e as
// normaliza em tiles quadrados prontos para o PDF. Imagem nenhuma derruba a
// geração do documento: falha vira o quadro "sem imagem".

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use image::{imageops, DynamicImage, Rgba, RgbaImage, RgbImage};
use tokio::time::timeout;

pub const TEMPO_LIMITE_IMAGEM: Duration = Duration::from_secs(5);
pub const LADO_TILE_PX: u32 = 512;

pub enum ImagemTile {
    Pronta(RgbImage),
    Indisponivel,
}

#[derive(Clone)]
pub struct BuscadorImagens {
    http: reqwest::Client,
    dir_uploads: PathBuf,
}

impl BuscadorImagens {
    pub fn new(dir_uploads: PathBuf) -> Self {
        Self {
            http: reqwest::Client::new(),
            dir_uploads,
        }
    }

    pub async fn buscar_tile(&self, origem: Option<&str>) -> ImagemTile {
        let Some(origem) = origem.map(str::trim).filter(|o| !o.is_empty()) else {
            return ImagemTile::Indisponivel;
        };

        match timeout(TEMPO_LIMITE_IMAGEM, self.carregar(origem)).await {
            Ok(Ok(imagem)) => ImagemTile::Pronta(compor_tile(imagem)),
            Ok(Err(motivo)) => {
                tracing::warn!("Imagem '{}' ignorada: {:#}", origem, motivo);
                ImagemTile::Indisponivel
            }
            Err(_) => {
                tracing::warn!(
                    "Imagem '{}' ignorada: tempo limite de {}s excedido",
                    origem,
                    TEMPO_LIMITE_IMAGEM.as_secs()
                );
                ImagemTile::Indisponivel
            }
        }
    }

    async fn carregar(&self, origem: &str) -> anyhow::Result<DynamicImage> {
        if origem.starts_with("http://") || origem.starts_with("https://") {
            let bytes = self
                .http
                .get(origem)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            return Ok(image::load_from_memory(&bytes)?);
        }

        // Caminhos locais são sempre relativos à pasta de uploads, com ou sem
        // o prefixo que o endpoint de upload devolve.
        let relativo = origem.trim_start_matches('/');
        let relativo = relativo.strip_prefix("uploads/").unwrap_or(relativo);
        if relativo.split('/').any(|parte| parte == "..") {
            anyhow::bail!("caminho fora da pasta de uploads");
        }

        let caminho = self.dir_uploads.join(relativo);
        let bytes = tokio::fs::read(&caminho)
            .await
            .with_context(|| format!("lendo {}", caminho.display()))?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

// Redimensiona mantendo a proporção e centraliza sobre um fundo branco
// quadrado, para que todo tile ocupe o mesmo espaço no documento.
pub fn compor_tile(imagem: DynamicImage) -> RgbImage {
    let redimensionada = imagem.resize(LADO_TILE_PX, LADO_TILE_PX, imageops::FilterType::Triangle);
    let mut tela = RgbaImage::from_pixel(LADO_TILE_PX, LADO_TILE_PX, Rgba([255, 255, 255, 255]));
    let x = (LADO_TILE_PX - redimensionada.width()) / 2;
    let y = (LADO_TILE_PX - redimensionada.height()) / 2;
    imageops::overlay(&mut tela, &redimensionada.to_rgba8(), x as i64, y as i64);
    DynamicImage::ImageRgba8(tela).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn imagem_de_teste(largura: u32, altura: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(largura, altura, Rgb([10, 200, 50])))
    }

    #[test]
    fn compor_tile_centraliza_sobre_fundo_branco() {
        let tile = compor_tile(imagem_de_teste(10, 20));

        assert_eq!(tile.dimensions(), (LADO_TILE_PX, LADO_TILE_PX));
        // Imagem alta e estreita: as laterais ficam com o fundo.
        assert_eq!(tile.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(tile.get_pixel(256, 256), &Rgb([10, 200, 50]));
    }

    #[tokio::test]
    async fn origem_vazia_vira_indisponivel() {
        let buscador = BuscadorImagens::new(PathBuf::from("uploads"));

        assert!(matches!(buscador.buscar_tile(None).await, ImagemTile::Indisponivel));
        assert!(matches!(
            buscador.buscar_tile(Some("   ")).await,
            ImagemTile::Indisponivel
        ));
    }

    #[tokio::test]
    async fn arquivo_inexistente_vira_indisponivel() {
        let dir = tempfile::tempdir().unwrap();
        let buscador = BuscadorImagens::new(dir.path().to_path_buf());

        let tile = buscador.buscar_tile(Some("nao-existe.png")).await;
        assert!(matches!(tile, ImagemTile::Indisponivel));
    }

    #[tokio::test]
    async fn caminho_fora_da_pasta_e_rejeitado() {
        let dir = tempfile::tempdir().unwrap();
        let buscador = BuscadorImagens::new(dir.path().to_path_buf());

        let tile = buscador.buscar_tile(Some("../segredo.png")).await;
        assert!(matches!(tile, ImagemTile::Indisponivel));
    }

    #[tokio::test]
    async fn arquivo_local_vira_tile_quadrado() {
        let dir = tempfile::tempdir().unwrap();
        imagem_de_teste(10, 20)
            .save(dir.path().join("produto.png"))
            .unwrap();
        let buscador = BuscadorImagens::new(dir.path().to_path_buf());

        // Com e sem o prefixo devolvido pelo upload.
        for origem in ["produto.png", "uploads/produto.png", "/uploads/produto.png"] {
            match buscador.buscar_tile(Some(origem)).await {
                ImagemTile::Pronta(tile) => {
                    assert_eq!(tile.dimensions(), (LADO_TILE_PX, LADO_TILE_PX));
                }
                ImagemTile::Indisponivel => panic!("imagem '{}' deveria carregar", origem),
            }
        }
    }
}
