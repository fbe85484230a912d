// Shared test data

use crate::ndb_models::{
    Agency, BusApiResponse, Departure, Place, Platform, Query, Route, Stop, TransportMode, Trip,
};

pub const SAMPLE_BUS_JSON: &str = r#"{
    "timestamp": "2024-05-01T10:00:00",
    "query": { "queryTime": "2024-05-01T10:00:00", "query": "740000001" },
    "stops": [
        {
            "id": "740000001",
            "name": "Centralstationen",
            "lat": 59.330136,
            "lon": 18.058151,
            "transport_modes": ["BUS", "TRAM"],
            "alerts": []
        }
    ],
    "departures": [
        {
            "scheduled": "2024-05-01T10:05:00",
            "realtime": "2024-05-01T10:06:30",
            "delay": 90,
            "canceled": false,
            "route": {
                "name": null,
                "designation": "592",
                "transport_mode_code": 700,
                "transport_mode": "BUS",
                "direction": "Flygplatsen",
                "origin": { "id": "740000001", "name": "Centralstationen" },
                "destination": { "id": "740000555", "name": "Flygplatsen" }
            },
            "trip": { "trip_id": "14010000612345678", "start_date": "2024-05-01", "technical_number": 12 },
            "agency": { "id": "505000000000000001", "name": "Storstadstrafik", "operator": "Nobina" },
            "stop": {
                "id": "740000001",
                "name": "Centralstationen",
                "lat": 59.330136,
                "lon": 18.058151,
                "transport_modes": ["BUS"],
                "alerts": []
            },
            "scheduled_platform": { "id": "9022001000001002", "designation": "B" },
            "realtime_platform": { "id": "9022001000001002", "designation": "B" },
            "alerts": [],
            "is_realtime": true
        },
        {
            "scheduled": "2024-05-01T10:07:00",
            "realtime": "2024-05-01T10:07:00",
            "delay": 0,
            "canceled": true,
            "route": {
                "name": null,
                "designation": "4",
                "transport_mode_code": 700,
                "transport_mode": "BUS",
                "direction": "Hamnen",
                "origin": { "id": "740000001", "name": "Centralstationen" },
                "destination": { "id": "740000777", "name": "Hamnen" }
            },
            "trip": { "trip_id": "14010000687654321", "start_date": "2024-05-01", "technical_number": 7 },
            "agency": { "id": "505000000000000001", "name": "Storstadstrafik", "operator": "Nobina" },
            "stop": {
                "id": "740000001",
                "name": "Centralstationen",
                "lat": 59.330136,
                "lon": 18.058151,
                "transport_modes": ["BUS"],
                "alerts": []
            },
            "scheduled_platform": { "id": "9022001000001004", "designation": "D" },
            "realtime_platform": { "id": "9022001000001004", "designation": "D" },
            "alerts": [],
            "is_realtime": false
        },
        {
            "scheduled": "2024-05-01T10:12:00",
            "realtime": "2024-05-01T10:11:55",
            "delay": -5,
            "canceled": false,
            "route": {
                "name": "Spårväg City",
                "designation": "7",
                "transport_mode_code": 900,
                "transport_mode": "TRAM",
                "direction": "Djurgården",
                "origin": { "id": "740000001", "name": "Centralstationen" },
                "destination": { "id": "740000888", "name": "Djurgården" }
            },
            "trip": { "trip_id": "14010000611112222", "start_date": "2024-05-01", "technical_number": 3 },
            "agency": { "id": "505000000000000002", "name": "Storstadstrafik", "operator": "Arriva" },
            "stop": {
                "id": "740000001",
                "name": "Centralstationen",
                "lat": 59.330136,
                "lon": 18.058151,
                "transport_modes": ["TRAM"],
                "alerts": []
            },
            "scheduled_platform": { "id": "9022001000001010", "designation": "T" },
            "realtime_platform": { "id": "9022001000001010", "designation": "T" },
            "alerts": [],
            "is_realtime": true
        }
    ]
}"#;

pub fn sample_snapshot() -> BusApiResponse {
    serde_json::from_str(SAMPLE_BUS_JSON).unwrap()
}

pub fn departure(designation: &str, scheduled: &str, delay: i64, canceled: bool) -> Departure {
    let place = |name: &str| Place {
        id: format!("id-{}", name),
        name: name.to_string(),
    };
    let platform = Platform {
        id: "p1".to_string(),
        designation: "A".to_string(),
    };

    Departure {
        scheduled: scheduled.to_string(),
        realtime: scheduled.to_string(),
        delay,
        canceled,
        route: Route {
            name: None,
            designation: designation.to_string(),
            transport_mode_code: 700,
            transport_mode: TransportMode::Bus,
            direction: "Terminus".to_string(),
            origin: place("Origin"),
            destination: place("Terminus"),
        },
        trip: Trip {
            trip_id: format!("trip-{}", designation),
            start_date: "2024-05-01".to_string(),
            technical_number: 1,
        },
        agency: Agency {
            id: "agency".to_string(),
            name: "Agency".to_string(),
            operator: "Operator".to_string(),
        },
        stop: stop("Centralstationen"),
        scheduled_platform: platform.clone(),
        realtime_platform: platform,
        alerts: Vec::new(),
        is_realtime: true,
    }
}

pub fn stop(name: &str) -> Stop {
    Stop {
        id: format!("stop-{}", name),
        name: name.to_string(),
        lat: 59.33,
        lon: 18.06,
        transport_modes: vec!["BUS".to_string()],
        alerts: Vec::new(),
    }
}

pub fn snapshot(timestamp: &str, stops: Vec<Stop>, departures: Vec<Departure>) -> BusApiResponse {
    BusApiResponse {
        timestamp: Some(timestamp.to_string()),
        query: Query {
            query_time: timestamp.to_string(),
            query: "740000001".to_string(),
        },
        stops,
        departures,
    }
}
