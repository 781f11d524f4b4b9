//! Static log corpora used across harnesses.
//!
//! Lines are taken from the shape of real monitor output: a tab-separated log
//! with its `#`-directive header, and the same records in JSON-lines form.

/// Tab-separated HTTP log with header, five records and a trailer.
pub const TSV_LOG: &str = "#separator \\x09
#set_separator\t,
#empty_field\t(empty)
#unset_field\t-
#path\thttp
#open\t2011-03-18-19-06-08
#fields\tts\tuid\tid.orig_h\tid.orig_p\tid.resp_h\tid.resp_p\ttrans_depth\tmethod\thost\turi\treferrer\tuser_agent\trequest_body_len\tresponse_body_len\tstatus_code\tstatus_msg\tinfo_code\tinfo_msg\ttags\tusername\tpassword\tproxied\torig_fuids\torig_mime_types\tresp_fuids\tresp_mime_types
#types\ttime\tstring\taddr\tport\taddr\tport\tcount\tstring\tstring\tstring\tstring\tstring\tcount\tcount\tcount\tstring\tcount\tstring\tset[enum]\tstring\tstring\tset[string]\tvector[string]\tvector[string]\tvector[string]\tvector[string]
1300475168.652003\tCUM0KZ3MLUfNB0cl11\t141.142.220.118\t48649\t208.80.152.118\t80\t1\tGET\tbits.wikimedia.org\t/skins-1.5/monobook/main.css\thttp://www.wikipedia.org/\tMozilla/5.0\t0\t2675\t200\tOK\t-\t-\t(empty)\t-\t-\t-\t-\t-\tFakNcS1Jfe01uljb3\ttext/plain
1300475168.853899\tCjhGID4nQcgTWjvg4c\t141.142.220.118\t43927\t141.142.2.2\t3128\t1\tGET\tupload.wikimedia.org\thttp://upload.wikimedia.org/wikipedia/commons/6/63/Wikipedia-logo.png?v=2#top\t-\tMozilla/5.0\t0\t7803\t200\tOK\t-\t-\t(empty)\t-\t-\tVIA -> 1.1 proxy\t-\t-\tF2yGNX2vGXLxfZeD12\timage/png
1300475169.780331\tCtPZjS20MLrsMUOJi2\t141.142.220.235\t6705\t173.192.163.128\t443\t1\tCONNECT\t173.192.163.128\t173.192.163.128:443\t-\t-\t0\t0\t200\tConnection established\t-\t-\t(empty)\t-\t-\t-\t-\t-\t-\t-
1300475170.862384\tCP5puj4I8PtEU4qzYg\t141.142.220.118\t50000\t208.80.152.2\t80\t2\tGET\tmeta.wikimedia.org\t:::garbage\t-\tcurl/7.21\t0\t0\t400\tBad Request\t-\t-\tHTTP::URI_SQLI\t-\t-\t-\t-\t-\t-\t-
1300475171.675372\tC37jN32gN3y3AZzyf6\t141.142.220.50\t5353\t224.0.0.251\t80\t1\tPOST\tupdates.vendor.test\t/api/v1/check\t-\tupdater/2.0\t312\t64\t100\tContinue\t100\tContinue\t(empty)\tadmin\ts3cret\t-\tFt1ZuT2XkR5h7hL9Ee\tapplication/json\t-\t-
#close\t2011-03-18-19-06-09
";

/// The first three records of [`TSV_LOG`] as JSON lines.
pub const JSON_LOG: &str = r#"{"ts":1300475168.652003,"uid":"CUM0KZ3MLUfNB0cl11","id.orig_h":"141.142.220.118","id.orig_p":48649,"id.resp_h":"208.80.152.118","id.resp_p":80,"trans_depth":1,"method":"GET","host":"bits.wikimedia.org","uri":"/skins-1.5/monobook/main.css","referrer":"http://www.wikipedia.org/","user_agent":"Mozilla/5.0","request_body_len":0,"response_body_len":2675,"status_code":200,"status_msg":"OK","tags":[],"resp_fuids":["FakNcS1Jfe01uljb3"],"resp_mime_types":["text/plain"]}
{"ts":1300475168.853899,"uid":"CjhGID4nQcgTWjvg4c","id.orig_h":"141.142.220.118","id.orig_p":43927,"id.resp_h":"141.142.2.2","id.resp_p":3128,"trans_depth":1,"method":"GET","host":"upload.wikimedia.org","uri":"http://upload.wikimedia.org/wikipedia/commons/6/63/Wikipedia-logo.png?v=2#top","user_agent":"Mozilla/5.0","request_body_len":0,"response_body_len":7803,"status_code":200,"status_msg":"OK","tags":[],"proxied":["VIA -> 1.1 proxy"],"resp_fuids":["F2yGNX2vGXLxfZeD12"],"resp_mime_types":["image/png"]}
{"ts":1300475169.780331,"uid":"CtPZjS20MLrsMUOJi2","id.orig_h":"141.142.220.235","id.orig_p":6705,"id.resp_h":"173.192.163.128","id.resp_p":443,"trans_depth":1,"method":"CONNECT","host":"173.192.163.128","uri":"173.192.163.128:443","request_body_len":0,"response_body_len":0,"status_code":200,"status_msg":"Connection established","tags":[]}
"#;

/// Request URIs after normalization for the records of [`TSV_LOG`], in order.
pub const TSV_NORMALIZED_URIS: &[&str] = &[
    "/skins-1.5/monobook/main.css",
    "/wikipedia/commons/6/63/Wikipedia-logo.png?v=2",
    "",
    "",
    "/api/v1/check",
];
