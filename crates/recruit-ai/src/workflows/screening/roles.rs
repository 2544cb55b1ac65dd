/// Requirement lists for the roles the intake form offers.
pub const ROLE_REQUIREMENTS: &[(&str, &[&str])] = &[
    (
        "AI/ML Engineer",
        &[
            "Python", "PyTorch", "TensorFlow", "Machine Learning", "Deep Learning", "MLOps",
            "Scikit-Learn", "NLP", "Computer Vision", "Reinforcement Learning", "Hugging Face",
            "Data Engineering", "Feature Engineering", "AutoML",
        ],
    ),
    (
        "Frontend Engineer",
        &[
            "React", "Vue", "Angular", "HTML5", "CSS3", "JavaScript", "TypeScript", "Next.js",
            "Svelte", "Bootstrap", "Tailwind CSS", "GraphQL", "Redux", "WebAssembly", "Three.js",
            "Performance Optimization",
        ],
    ),
    (
        "Backend Engineer",
        &[
            "Python", "Java", "Node.js", "REST APIs", "Cloud services", "Kafka", "Docker",
            "GraphQL", "Microservices", "gRPC", "Spring Boot", "FastAPI", "SQL & NoSQL Databases",
            "Redis", "RabbitMQ", "CI/CD",
        ],
    ),
    (
        "Data Engineer",
        &[
            "Python", "SQL", "Apache Spark", "Hadoop", "Kafka", "ETL Pipelines", "Airflow",
            "BigQuery", "Redshift", "Data Warehousing", "Snowflake", "Azure Data Factory", "GCP",
            "AWS Glue", "DBT",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "Kubernetes", "Docker", "Terraform", "CI/CD", "AWS", "Azure", "GCP", "Jenkins",
            "Ansible", "Prometheus", "Grafana", "Helm", "Linux Administration", "Networking",
            "Site Reliability Engineering (SRE)",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "JavaScript", "TypeScript", "React", "Node.js", "Express", "MongoDB", "SQL", "HTML5",
            "CSS3", "RESTful APIs", "Git", "CI/CD", "Cloud", "Responsive Design",
            "Authentication & Authorization",
        ],
    ),
    (
        "Data Scientist",
        &[
            "Python", "R", "SQL", "Machine Learning", "Statistics", "Data Visualization",
            "Pandas", "NumPy", "Scikit-learn", "Jupyter", "Hypothesis Testing",
            "Experimental Design", "Feature Engineering", "Model Evaluation",
        ],
    ),
];

/// Case-insensitive lookup of a role's requirement list.
pub fn requirements_for(role: &str) -> Option<&'static [&'static str]> {
    let role = role.trim();
    ROLE_REQUIREMENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(role))
        .map(|(_, requirements)| *requirements)
}

pub fn known_roles() -> impl Iterator<Item = &'static str> {
    ROLE_REQUIREMENTS.iter().map(|(name, _)| *name)
}
