// src/services/pdf/paleta.rs
//
// O usuário configura uma única cor; todo o resto do esquema é derivado dela
// para que pedido e catálogo saiam visualmente coerentes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorRgb(pub u8, pub u8, pub u8);

pub const BRANCO: CorRgb = CorRgb(255, 255, 255);
pub const PRETO: CorRgb = CorRgb(0, 0, 0);
pub const TEXTO: CorRgb = CorRgb(45, 52, 54);
pub const FUNDO_CLARO: CorRgb = CorRgb(236, 240, 241);

// Azul-petróleo usado quando não há cor configurada.
const PRIMARIA_PADRAO: CorRgb = CorRgb(0x2C, 0x3E, 0x50);

pub struct Paleta {
    pub primaria: CorRgb,
    pub secundaria: CorRgb,
    pub destaque: CorRgb,
    pub sucesso: CorRgb,
    pub neutra: CorRgb,
}

impl Paleta {
    pub fn derivar(cor_primaria: Option<&str>) -> Self {
        let primaria = cor_primaria
            .and_then(interpretar_hex)
            .unwrap_or(PRIMARIA_PADRAO);
        Self {
            primaria,
            secundaria: escurecer(primaria, 0.75),
            destaque: clarear(primaria, 0.2),
            sucesso: CorRgb(39, 174, 96),
            neutra: CorRgb(127, 140, 141),
        }
    }
}

// Aceita "#RRGGBB" ou "RRGGBB"; qualquer outra coisa é descartada.
pub fn interpretar_hex(texto: &str) -> Option<CorRgb> {
    let hex = texto.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(CorRgb(r, g, b))
}

pub fn escurecer(c: CorRgb, fator: f32) -> CorRgb {
    CorRgb(
        (c.0 as f32 * fator).round() as u8,
        (c.1 as f32 * fator).round() as u8,
        (c.2 as f32 * fator).round() as u8,
    )
}

pub fn clarear(c: CorRgb, fator: f32) -> CorRgb {
    CorRgb(
        (c.0 as f32 + (255.0 - c.0 as f32) * fator).round() as u8,
        (c.1 as f32 + (255.0 - c.1 as f32) * fator).round() as u8,
        (c.2 as f32 + (255.0 - c.2 as f32) * fator).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretar_hex_aceita_com_e_sem_cerquilha() {
        assert_eq!(interpretar_hex("#2C3E50"), Some(CorRgb(44, 62, 80)));
        assert_eq!(interpretar_hex("2c3e50"), Some(CorRgb(44, 62, 80)));
        assert_eq!(interpretar_hex("  #FF0000  "), Some(CorRgb(255, 0, 0)));
    }

    #[test]
    fn interpretar_hex_rejeita_formatos_invalidos() {
        assert_eq!(interpretar_hex("azul"), None);
        assert_eq!(interpretar_hex("#2C3E5"), None);
        assert_eq!(interpretar_hex("#2C3E50FF"), None);
        assert_eq!(interpretar_hex("#GGGGGG"), None);
        assert_eq!(interpretar_hex(""), None);
    }

    #[test]
    fn derivar_usa_o_padrao_quando_nao_ha_cor() {
        let paleta = Paleta::derivar(None);
        assert_eq!(paleta.primaria, CorRgb(44, 62, 80));

        let invalida = Paleta::derivar(Some("verde-limão"));
        assert_eq!(invalida.primaria, CorRgb(44, 62, 80));
    }

    #[test]
    fn derivar_calcula_as_variacoes_da_primaria() {
        let paleta = Paleta::derivar(Some("#2C3E50"));
        assert_eq!(paleta.secundaria, CorRgb(33, 47, 60));
        assert_eq!(paleta.destaque, CorRgb(86, 101, 115));
        assert_eq!(paleta.sucesso, CorRgb(39, 174, 96));
        assert_eq!(paleta.neutra, CorRgb(127, 140, 141));
    }

    #[test]
    fn escurecer_e_clarear_ficam_dentro_da_faixa() {
        assert_eq!(escurecer(CorRgb(255, 255, 255), 0.0), CorRgb(0, 0, 0));
        assert_eq!(clarear(CorRgb(0, 0, 0), 1.0), CorRgb(255, 255, 255));
        assert_eq!(escurecer(CorRgb(10, 10, 10), 1.0), CorRgb(10, 10, 10));
    }
}
