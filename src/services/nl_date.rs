// src/services/nl_date.rs

//! Interpretação de referências de mês em linguagem livre ("julho 2025",
//! "7 2025", "julho de 2025", "07/2025"). Aceita nomes de mês em português
//! e em inglês, já que as planilhas antigas gravavam os dois.

use chrono::{Datelike, NaiveDate};

// Nomes já sem acento; a entrada passa por fold_accents antes da busca.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("janeiro", 1),
    ("january", 1),
    ("fevereiro", 2),
    ("february", 2),
    ("marco", 3),
    ("march", 3),
    ("abril", 4),
    ("april", 4),
    ("maio", 5),
    ("may", 5),
    ("junho", 6),
    ("june", 6),
    ("julho", 7),
    ("july", 7),
    ("agosto", 8),
    ("august", 8),
    ("setembro", 9),
    ("september", 9),
    ("outubro", 10),
    ("october", 10),
    ("novembro", 11),
    ("november", 11),
    ("dezembro", 12),
    ("december", 12),
];

/// Troca vogais acentuadas e cedilha pelos equivalentes ASCII.
pub fn fold_accents(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// Nome completo ou prefixo de pelo menos 3 letras ("jul" -> julho).
fn month_from_name(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .find(|(name, _)| name.starts_with(token))
        .map(|&(_, month)| month)
}

/// Resolve um texto livre para o primeiro dia do mês referido.
///
/// Sem ano no texto, assume o ano de `today`. Devolve `None` quando nenhum
/// mês é reconhecível.
pub fn parse_month_reference(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = fold_accents(&text.trim().to_lowercase());

    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;

    for token in normalized.split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | '.')) {
        if token.is_empty() || token == "de" {
            continue;
        }
        if month.is_none() {
            if let Some(found) = month_from_name(token) {
                month = Some(found);
                continue;
            }
        }
        if let Ok(number) = token.parse::<i32>() {
            match number {
                1..=12 if month.is_none() => month = Some(number as u32),
                2000..=2100 if year.is_none() => year = Some(number),
                _ => {}
            }
        }
    }

    NaiveDate::from_ymd_opt(year.unwrap_or(today.year()), month?, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 8).unwrap()
    }

    fn primeiro_dia(ano: i32, mes: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, 1).unwrap()
    }

    #[test]
    fn nome_do_mes_com_ano() {
        assert_eq!(parse_month_reference("julho 2025", hoje()), Some(primeiro_dia(2025, 7)));
        assert_eq!(parse_month_reference("julho de 2025", hoje()), Some(primeiro_dia(2025, 7)));
    }

    #[test]
    fn mes_numerico() {
        assert_eq!(parse_month_reference("7 2025", hoje()), Some(primeiro_dia(2025, 7)));
        assert_eq!(parse_month_reference("07/2025", hoje()), Some(primeiro_dia(2025, 7)));
        assert_eq!(parse_month_reference("12 2024", hoje()), Some(primeiro_dia(2024, 12)));
    }

    #[test]
    fn acentos_e_maiusculas_nao_atrapalham() {
        assert_eq!(parse_month_reference("Março 2026", hoje()), Some(primeiro_dia(2026, 3)));
    }

    #[test]
    fn abreviacao_de_tres_letras() {
        assert_eq!(parse_month_reference("jul 2025", hoje()), Some(primeiro_dia(2025, 7)));
        assert_eq!(parse_month_reference("dez 2025", hoje()), Some(primeiro_dia(2025, 12)));
    }

    #[test]
    fn nome_em_ingles_tambem_resolve() {
        assert_eq!(parse_month_reference("august 2025", hoje()), Some(primeiro_dia(2025, 8)));
    }

    #[test]
    fn sem_ano_assume_o_ano_corrente() {
        assert_eq!(parse_month_reference("agosto", hoje()), Some(primeiro_dia(2025, 8)));
    }

    #[test]
    fn texto_sem_mes_reconhecivel_da_none() {
        assert_eq!(parse_month_reference("qualquer coisa", hoje()), None);
        assert_eq!(parse_month_reference("2025", hoje()), None);
        assert_eq!(parse_month_reference("", hoje()), None);
    }
}
