//! DTOs for decoding ViaCEP JSON responses.
//!
//! The adapter decodes into this transport DTO first, then maps into the
//! domain's [`UpstreamCep`] in one pass. An unknown code comes back as
//! `{"erro": true}` (older deployments send the string `"true"`), which maps
//! to `None` rather than an error: a registry miss is a business outcome,
//! not an infrastructure fault.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::UpstreamCep;

#[derive(Debug, Deserialize)]
pub(super) struct ViaCepResponseDto {
    #[serde(default)]
    erro: Option<Value>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    complemento: Option<String>,
    #[serde(default)]
    unidade: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    #[serde(default)]
    estado: Option<String>,
    #[serde(default)]
    regiao: Option<String>,
    #[serde(default)]
    ibge: Option<String>,
    #[serde(default)]
    gia: Option<String>,
    #[serde(default)]
    ddd: Option<String>,
    #[serde(default)]
    siafi: Option<String>,
}

impl ViaCepResponseDto {
    /// True when the payload is the registry's unknown-code sentinel.
    fn is_miss_sentinel(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flagged)) => *flagged,
            Some(Value::String(text)) => text == "true",
            _ => false,
        }
    }

    /// Map the payload into the domain shape, or `None` for a registry miss.
    ///
    /// Required address fields must be present on a non-sentinel payload;
    /// anything else is a decode failure described by the returned message.
    /// Blank optional fields are normalised to `None`.
    pub(super) fn into_upstream(self) -> Result<Option<UpstreamCep>, String> {
        if self.is_miss_sentinel() {
            return Ok(None);
        }

        let locality = require(self.localidade, "localidade")?;
        let state_code = require(self.uf, "uf")?;

        // Older payloads omit estado/regiao entirely; tolerate that rather
        // than failing the whole lookup.
        Ok(Some(UpstreamCep {
            street: self.logradouro.unwrap_or_default(),
            complement: normalise(self.complemento),
            unit: normalise(self.unidade),
            neighborhood: self.bairro.unwrap_or_default(),
            locality,
            state_code,
            state_name: self.estado.unwrap_or_default(),
            region: self.regiao.unwrap_or_default(),
            ibge: normalise(self.ibge),
            gia: normalise(self.gia),
            area_code: normalise(self.ddd),
            siafi: normalise(self.siafi),
        }))
    }
}

fn require(field: Option<String>, name: &str) -> Result<String, String> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("registry payload missing required field `{name}`"))
}

fn normalise(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> ViaCepResponseDto {
        serde_json::from_str(body).expect("payload should decode")
    }

    #[test]
    fn full_payload_maps_into_upstream_record() {
        let dto = decode(
            r#"{
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "complemento": "de 612 a 1510 - lado par",
                "unidade": "",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP",
                "estado": "São Paulo",
                "regiao": "Sudeste",
                "ibge": "3550308",
                "gia": "1004",
                "ddd": "11",
                "siafi": "7107"
            }"#,
        );

        let upstream = dto
            .into_upstream()
            .expect("payload maps")
            .expect("not a miss");
        assert_eq!(upstream.street, "Avenida Paulista");
        assert_eq!(upstream.unit, None, "blank fields normalise to None");
        assert_eq!(upstream.state_code, "SP");
        assert_eq!(upstream.region, "Sudeste");
        assert_eq!(upstream.area_code.as_deref(), Some("11"));
    }

    #[test]
    fn boolean_error_sentinel_maps_to_miss() {
        let dto = decode(r#"{"erro": true}"#);
        assert_eq!(dto.into_upstream().expect("decodes"), None);
    }

    #[test]
    fn string_error_sentinel_maps_to_miss() {
        let dto = decode(r#"{"erro": "true"}"#);
        assert_eq!(dto.into_upstream().expect("decodes"), None);
    }

    #[test]
    fn missing_required_field_is_a_decode_failure() {
        let dto = decode(r#"{"cep": "01310-100", "uf": "SP"}"#);
        let err = dto.into_upstream().expect_err("localidade required");
        assert!(err.contains("localidade"));
    }

    #[test]
    fn payload_without_estado_and_regiao_still_maps() {
        let dto = decode(
            r#"{
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            }"#,
        );

        let upstream = dto
            .into_upstream()
            .expect("payload maps")
            .expect("not a miss");
        assert_eq!(upstream.state_name, "");
        assert_eq!(upstream.region, "");
    }
}
