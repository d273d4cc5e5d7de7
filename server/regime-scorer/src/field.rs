//! Named input columns, used for CSV validation and per-field breakdowns.

use std::fmt;
use std::str::FromStr;

use crate::error::ScorerError;
use crate::types::InputRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  Genero,
  GrupoEtario,
  Regimen,
  TipoAfiliado,
  Departamento,
  Municipio,
  Zona,
  NivelSisben,
  EstadoAfiliado,
  CondicionBeneficiario,
}

impl Field {
  pub const ALL: [Field; 10] = [
    Field::Genero,
    Field::GrupoEtario,
    Field::Regimen,
    Field::TipoAfiliado,
    Field::Departamento,
    Field::Municipio,
    Field::Zona,
    Field::NivelSisben,
    Field::EstadoAfiliado,
    Field::CondicionBeneficiario,
  ];

  /// Columns a batch upload must carry.
  pub const REQUIRED: [Field; 7] = [
    Field::Genero,
    Field::GrupoEtario,
    Field::TipoAfiliado,
    Field::Departamento,
    Field::Municipio,
    Field::Zona,
    Field::NivelSisben,
  ];

  /// Column / JSON key name.
  pub fn column(self) -> &'static str {
    match self {
      Self::Genero => "Genero",
      Self::GrupoEtario => "Grupo_etario",
      Self::Regimen => "Régimen",
      Self::TipoAfiliado => "Tipo_afiliado",
      Self::Departamento => "Departamento",
      Self::Municipio => "Municipio",
      Self::Zona => "Zona",
      Self::NivelSisben => "Nivel_Sisben",
      Self::EstadoAfiliado => "Estado_afiliado",
      Self::CondicionBeneficiario => "Condicion_beneficiario",
    }
  }

  pub fn get(self, record: &InputRecord) -> Option<&str> {
    let v = match self {
      Self::Genero => &record.genero,
      Self::GrupoEtario => &record.grupo_etario,
      Self::Regimen => &record.regimen,
      Self::TipoAfiliado => &record.tipo_afiliado,
      Self::Departamento => &record.departamento,
      Self::Municipio => &record.municipio,
      Self::Zona => &record.zona,
      Self::NivelSisben => &record.nivel_sisben,
      Self::EstadoAfiliado => &record.estado_afiliado,
      Self::CondicionBeneficiario => &record.condicion_beneficiario,
    };
    v.as_deref()
  }

  /// Required columns absent from `headers`, in declaration order.
  pub fn missing_required<'a, I>(headers: I) -> Vec<Field>
  where
    I: IntoIterator<Item = &'a str>,
  {
    let present: Vec<Field> = headers.into_iter().filter_map(|h| h.parse().ok()).collect();
    Self::REQUIRED
      .iter()
      .copied()
      .filter(|f| !present.contains(f))
      .collect()
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.column())
  }
}

impl FromStr for Field {
  type Err = ScorerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s == "Regimen" {
      return Ok(Self::Regimen);
    }
    Self::ALL
      .iter()
      .copied()
      .find(|f| f.column() == s)
      .ok_or_else(|| ScorerError::invalid_value("field", s))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_column_names() {
    assert_eq!("Zona".parse::<Field>().unwrap(), Field::Zona);
    assert_eq!("Régimen".parse::<Field>().unwrap(), Field::Regimen);
    assert_eq!("Regimen".parse::<Field>().unwrap(), Field::Regimen);
    assert!("zona".parse::<Field>().is_err());
  }

  #[test]
  fn missing_required_lists_absent_columns() {
    let headers = ["Genero", "Grupo_etario", "Zona", "Municipio", "Otro"];
    let missing = Field::missing_required(headers);
    assert_eq!(
      missing,
      vec![Field::TipoAfiliado, Field::Departamento, Field::NivelSisben]
    );
  }

  #[test]
  fn get_reads_matching_field() {
    let r = InputRecord {
      municipio: Some("CALI".into()),
      ..InputRecord::default()
    };
    assert_eq!(Field::Municipio.get(&r), Some("CALI"));
    assert_eq!(Field::Zona.get(&r), None);
  }
}
