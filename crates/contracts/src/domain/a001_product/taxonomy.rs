//! Fixed apiculture product types and category tree offered by the product forms.

pub const PRODUCT_TYPES: &[&str] = &[
    "Madera",
    "Plástico",
    "Vidrio",
    "Metal",
    "Orgánico",
    "Cera",
    "Polen",
    "Miel",
    "Jalea Real",
    "Propóleo",
    "Pan de Abeja",
    "Veneno de Abeja",
    "Líquido",
    "Sólido",
    "Semisólido",
    "Polvo",
    "Herramienta",
    "Envase",
    "Insumo",
    "Producto Terminado",
    "Materia Prima",
    "Perecedero",
    "No Perecedero",
    "Tecnología",
    "Equipo de Protección",
    "Alimento para Abejas",
    "Medicamento",
    "Cosmético",
    "Suplemento Alimenticio",
    "Bebida",
    "Extractor",
    "Mantenimiento",
    "Servicio",
    "Otro",
];

pub struct CategoryGroup {
    pub category: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const CATEGORIES: &[CategoryGroup] = &[
    CategoryGroup {
        category: "Productos Apícolas",
        subcategories: &[
            "Miel",
            "Polen",
            "Propóleo",
            "Jalea Real",
            "Cera de Abeja",
            "Pan de Abeja",
            "Veneno de Abeja",
        ],
    },
    CategoryGroup {
        category: "Productos Derivados",
        subcategories: &[
            "Caramelos de miel",
            "Galletas y snacks con miel o polen",
            "Cosméticos naturales (cremas, bálsamos, ungüentos)",
            "Suplementos alimenticios",
            "Bebidas energéticas o medicinales",
            "Jarabes naturales",
            "Velas artesanales",
            "Medicinas naturales",
        ],
    },
    CategoryGroup {
        category: "Insumos Apícolas",
        subcategories: &[
            "Cajas Langstroth",
            "Cajas Nacionales",
            "Cuadros y marcos",
            "Cera estampada",
            "Alzas y fondos sanitarios",
            "Separadores y excluidores de reina",
            "Trampas de polen",
            "Rejillas",
            "Alimentadores",
        ],
    },
    CategoryGroup {
        category: "Herramientas Apícolas",
        subcategories: &[
            "Ahumadores",
            "Pinzas y palancas",
            "Cepillos para abejas",
            "Guantes",
            "Trajes y velos protectores",
            "Herramientas para revisión",
            "Cuchillos desoperculadores",
            "Ganchos para cuadros",
            "Trampas atrapa enjambres",
        ],
    },
    CategoryGroup {
        category: "Procesamiento y Envasado",
        subcategories: &[
            "Extractores de miel",
            "Filtros de miel",
            "Decantadores",
            "Tanques de maduración",
            "Envasadoras",
            "Etiquetadoras",
            "Pasteurizadores",
            "Sistemas de limpieza de equipos",
            "Secadores de polen",
        ],
    },
    CategoryGroup {
        category: "Envases y Embalaje",
        subcategories: &[
            "Frascos de vidrio",
            "Frascos plásticos",
            "Bolsas al vacío",
            "Etiquetas",
            "Tapas con precinto",
            "Cajas para transporte",
            "Tubos para jalea",
            "Contenedores a granel",
        ],
    },
    CategoryGroup {
        category: "Control Sanitario y Alimentación",
        subcategories: &[
            "Alimentos proteicos",
            "Jarabes energéticos",
            "Vitaminas para abejas",
            "Medicamentos autorizados",
            "Tratamientos contra varroa",
            "Tratamientos contra loque",
            "Fumigantes orgánicos",
        ],
    },
    CategoryGroup {
        category: "Tecnología y Monitoreo",
        subcategories: &[
            "Básculas electrónicas para colmenas",
            "Sensores de temperatura y humedad",
            "Aplicaciones móviles de apicultura",
            "Rastreo por GPS",
            "Sistemas RFID para colmenas",
            "Software de gestión apícola",
        ],
    },
    CategoryGroup {
        category: "Educación y Servicios",
        subcategories: &[
            "Capacitaciones presenciales",
            "Cursos en línea",
            "Asesoría técnica",
            "Consultoría apícola",
            "Servicios de polinización",
            "Instalación de apiarios",
            "Diseño de etiquetas",
        ],
    },
    CategoryGroup {
        category: "Infraestructura Apícola",
        subcategories: &[
            "Apiarios (espacios físicos)",
            "Cámaras frías",
            "Centros de acopio",
            "Talleres de cera",
            "Laboratorios",
            "Centros de extracción",
            "Vehículos apícolas",
        ],
    },
    CategoryGroup {
        category: "Otros",
        subcategories: &[
            "Souvenirs",
            "Material promocional",
            "Publicidad con temática apícola",
            "Obsequios corporativos",
            "Decoración artesanal con cera",
        ],
    },
];

pub fn subcategories_of(category: &str) -> &'static [&'static str] {
    CATEGORIES
        .iter()
        .find(|group| group.category == category)
        .map(|group| group.subcategories)
        .unwrap_or(&[])
}

pub fn category_names() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|group| group.category)
}
