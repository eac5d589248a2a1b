// src/common/formato.rs
//
// Formatação pt-BR usada nos documentos: moeda, datas, truncamento de rótulos
// e slug para nomes de arquivo.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

// Horário de Brasília (sem horário de verão desde 2019).
const FUSO_BRASILIA_SEGUNDOS: i32 = -3 * 3600;

// "R$ 1.234,56" com duas casas, agrupamento de milhares e sinal antes do símbolo.
pub fn moeda(valor: Decimal) -> String {
    let arredondado = valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negativo = arredondado.is_sign_negative();
    let texto = format!("{:.2}", arredondado.abs());
    let (inteiro, centavos) = match texto.split_once('.') {
        Some(partes) => partes,
        None => (texto.as_str(), "00"),
    };

    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, digito) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*digito);
    }

    format!("{}R$ {},{}", if negativo { "-" } else { "" }, agrupado, centavos)
}

pub fn data_curta(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

// Carimbo "gerado em": data e hora locais por extenso curto.
pub fn data_hora_longa(instante: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(FUSO_BRASILIA_SEGUNDOS) {
        Some(fuso) => instante
            .with_timezone(&fuso)
            .format("%d/%m/%Y às %H:%M")
            .to_string(),
        None => instante.format("%d/%m/%Y às %H:%M").to_string(),
    }
}

// Data local (sem hora) de um instante UTC.
pub fn data_curta_instante(instante: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(FUSO_BRASILIA_SEGUNDOS) {
        Some(fuso) => data_curta(instante.with_timezone(&fuso).date_naive()),
        None => data_curta(instante.date_naive()),
    }
}

// Corta no orçamento de caracteres do campo e sinaliza com reticências.
pub fn truncar(texto: &str, maximo: usize) -> String {
    if texto.chars().count() <= maximo {
        return texto.to_string();
    }
    let corte: String = texto.chars().take(maximo).collect();
    format!("{}...", corte)
}

// Quebra um texto livre em linhas de até `maximo` caracteres, respeitando
// palavras; palavras maiores que o orçamento são cortadas à força.
pub fn quebrar_linhas(texto: &str, maximo: usize) -> Vec<String> {
    let mut linhas = Vec::new();
    let mut atual = String::new();

    for palavra in texto.split_whitespace() {
        let mut restante = palavra;
        while restante.chars().count() > maximo {
            if !atual.is_empty() {
                linhas.push(std::mem::take(&mut atual));
            }
            let pedaco: String = restante.chars().take(maximo).collect();
            let corte = pedaco.len();
            linhas.push(pedaco);
            restante = &restante[corte..];
        }
        if restante.is_empty() {
            continue;
        }
        if atual.is_empty() {
            atual.push_str(restante);
        } else if atual.chars().count() + 1 + restante.chars().count() <= maximo {
            atual.push(' ');
            atual.push_str(restante);
        } else {
            linhas.push(std::mem::take(&mut atual));
            atual.push_str(restante);
        }
    }
    if !atual.is_empty() {
        linhas.push(atual);
    }
    linhas
}

// Nome seguro para arquivo: minúsculas, sem acentos, hífens no lugar do resto.
pub fn slug(texto: &str) -> String {
    let mut saida = String::with_capacity(texto.len());
    let mut hifen_pendente = false;

    for c in texto.chars() {
        let simples = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'è' | 'É' | 'Ê' => 'e',
            'í' | 'î' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'û' | 'ü' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            outro => outro,
        };
        if simples.is_ascii_alphanumeric() {
            if hifen_pendente && !saida.is_empty() {
                saida.push('-');
            }
            hifen_pendente = false;
            saida.push(simples.to_ascii_lowercase());
        } else {
            hifen_pendente = true;
        }
    }
    saida
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(texto: &str) -> Decimal {
        texto.parse().unwrap()
    }

    #[test]
    fn moeda_formata_com_agrupamento_pt_br() {
        assert_eq!(moeda(dec("1234.56")), "R$ 1.234,56");
        assert_eq!(moeda(dec("0.5")), "R$ 0,50");
        assert_eq!(moeda(dec("25")), "R$ 25,00");
        assert_eq!(moeda(dec("1000000")), "R$ 1.000.000,00");
    }

    #[test]
    fn moeda_poe_sinal_antes_do_simbolo() {
        assert_eq!(moeda(dec("-12.3")), "-R$ 12,30");
    }

    #[test]
    fn moeda_arredonda_para_duas_casas() {
        assert_eq!(moeda(dec("10.005")), "R$ 10,01");
    }

    #[test]
    fn data_curta_usa_dia_mes_ano() {
        let data = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(data_curta(data), "07/03/2025");
    }

    #[test]
    fn data_hora_longa_converte_para_brasilia() {
        let instante = DateTime::parse_from_rfc3339("2025-06-10T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(data_hora_longa(instante), "10/06/2025 às 11:30");
    }

    #[test]
    fn data_curta_instante_vira_o_dia_no_fuso_local() {
        let instante = DateTime::parse_from_rfc3339("2025-06-10T01:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(data_curta_instante(instante), "09/06/2025");
    }

    #[test]
    fn truncar_preserva_textos_curtos() {
        assert_eq!(truncar("Arroz", 10), "Arroz");
    }

    #[test]
    fn truncar_corta_e_sinaliza() {
        assert_eq!(truncar("Arroz Agulhinha Tipo 1", 10), "Arroz Agul...");
    }

    #[test]
    fn truncar_conta_caracteres_e_nao_bytes() {
        assert_eq!(truncar("Açaí com granola", 4), "Açaí...");
    }

    #[test]
    fn quebrar_linhas_respeita_palavras() {
        let linhas = quebrar_linhas("entregar na parte da manhã sem falta", 14);
        assert_eq!(linhas, vec!["entregar na", "parte da manhã", "sem falta"]);
    }

    #[test]
    fn quebrar_linhas_corta_palavra_gigante() {
        let linhas = quebrar_linhas("abcdefghij", 4);
        assert_eq!(linhas, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn slug_normaliza_numero_de_pedido() {
        assert_eq!(slug("PED-2025-001"), "ped-2025-001");
    }

    #[test]
    fn slug_remove_acentos_e_simbolos() {
        assert_eq!(slug("Catálogo Premium (São Paulo)"), "catalogo-premium-sao-paulo");
    }
}
