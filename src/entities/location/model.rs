//! Read-only department/city catalog
//!
//! Ids are UUIDv5 values derived from the DANE codes, so they are stable
//! across restarts and backends.

use serde::Serialize;
use uuid::Uuid;

const LOCATION_NAMESPACE: Uuid = Uuid::from_u128(0x6a0f_3c52_9d1e_4b7a_8f21_c4d5_e6f7_0812);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    /// Two-digit DANE code
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: Uuid,
    /// Five-digit DANE code
    pub code: String,
    pub name: String,
    pub department_id: Uuid,
}

pub fn department_id(code: &str) -> Uuid {
    Uuid::new_v5(&LOCATION_NAMESPACE, format!("department:{code}").as_bytes())
}

pub fn city_id(code: &str) -> Uuid {
    Uuid::new_v5(&LOCATION_NAMESPACE, format!("city:{code}").as_bytes())
}

const COLOMBIA: &[(&str, &str, &[(&str, &str)])] = &[
    ("05", "Antioquia", &[
        ("05001", "Medellín"),
        ("05088", "Bello"),
        ("05266", "Envigado"),
        ("05360", "Itagüí"),
        ("05615", "Rionegro"),
    ]),
    ("08", "Atlántico", &[("08001", "Barranquilla"), ("08758", "Soledad")]),
    ("11", "Bogotá, D.C.", &[("11001", "Bogotá, D.C.")]),
    ("13", "Bolívar", &[("13001", "Cartagena de Indias")]),
    ("15", "Boyacá", &[
        ("15001", "Tunja"),
        ("15238", "Duitama"),
        ("15759", "Sogamoso"),
    ]),
    ("17", "Caldas", &[("17001", "Manizales")]),
    ("18", "Caquetá", &[("18001", "Florencia")]),
    ("19", "Cauca", &[("19001", "Popayán")]),
    ("20", "Cesar", &[("20001", "Valledupar")]),
    ("23", "Córdoba", &[("23001", "Montería")]),
    ("25", "Cundinamarca", &[
        ("25175", "Chía"),
        ("25290", "Fusagasugá"),
        ("25754", "Soacha"),
        ("25899", "Zipaquirá"),
    ]),
    ("27", "Chocó", &[("27001", "Quibdó")]),
    ("41", "Huila", &[("41001", "Neiva")]),
    ("44", "La Guajira", &[("44001", "Riohacha")]),
    ("47", "Magdalena", &[("47001", "Santa Marta")]),
    ("50", "Meta", &[("50001", "Villavicencio")]),
    ("52", "Nariño", &[("52001", "Pasto")]),
    ("54", "Norte de Santander", &[("54001", "Cúcuta")]),
    ("63", "Quindío", &[("63001", "Armenia")]),
    ("66", "Risaralda", &[("66001", "Pereira"), ("66170", "Dosquebradas")]),
    ("68", "Santander", &[("68001", "Bucaramanga"), ("68276", "Floridablanca")]),
    ("70", "Sucre", &[("70001", "Sincelejo")]),
    ("73", "Tolima", &[("73001", "Ibagué")]),
    ("76", "Valle del Cauca", &[
        ("76001", "Cali"),
        ("76109", "Buenaventura"),
        ("76520", "Palmira"),
    ]),
    ("81", "Arauca", &[("81001", "Arauca")]),
    ("85", "Casanare", &[("85001", "Yopal")]),
    ("86", "Putumayo", &[("86001", "Mocoa")]),
    ("88", "Archipiélago de San Andrés, Providencia y Santa Catalina", &[("88001", "San Andrés")]),
    ("91", "Amazonas", &[("91001", "Leticia")]),
    ("94", "Guainía", &[("94001", "Inírida")]),
    ("95", "Guaviare", &[("95001", "San José del Guaviare")]),
    ("97", "Vaupés", &[("97001", "Mitú")]),
    ("99", "Vichada", &[("99001", "Puerto Carreño")]),
];

/// In-memory catalog of departments and their cities
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    departments: Vec<Department>,
    cities: Vec<City>,
}

impl LocationCatalog {
    /// Colombian departments with their capitals and main municipalities
    pub fn colombia() -> Self {
        let mut departments = Vec::with_capacity(COLOMBIA.len());
        let mut cities = Vec::new();

        for (code, name, municipalities) in COLOMBIA {
            let id = department_id(code);
            departments.push(Department {
                id,
                code: code.to_string(),
                name: name.to_string(),
            });
            cities.extend(municipalities.iter().map(|(city_code, city_name)| City {
                id: city_id(city_code),
                code: city_code.to_string(),
                name: city_name.to_string(),
                department_id: id,
            }));
        }

        Self {
            departments,
            cities,
        }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn department(&self, id: Uuid) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn city(&self, id: Uuid) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn cities_of(&self, department: Uuid) -> Vec<&City> {
        self.cities
            .iter()
            .filter(|c| c.department_id == department)
            .collect()
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::colombia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let catalog = LocationCatalog::colombia();
        assert_eq!(catalog.departments().len(), 33);

        let antioquia = catalog.department(department_id("05")).unwrap();
        assert_eq!(antioquia.name, "Antioquia");
        let names: Vec<_> = catalog
            .cities_of(antioquia.id)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(names.contains(&"Medellín"));
    }

    #[test]
    fn test_ids_are_stable_and_distinct() {
        assert_eq!(department_id("11"), department_id("11"));
        assert_ne!(department_id("11"), city_id("11"));

        let catalog = LocationCatalog::colombia();
        let bogota = catalog.city(city_id("11001")).unwrap();
        assert_eq!(bogota.department_id, department_id("11"));
    }

    #[test]
    fn test_every_city_has_a_department() {
        let catalog = LocationCatalog::colombia();
        for city in catalog.cities() {
            assert!(catalog.department(city.department_id).is_some(), "{}", city.name);
        }
    }
}
