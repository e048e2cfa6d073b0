// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use arksign_byteark::{SignOptions, Signer, VerifyOptions};
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

criterion_group!(benches, bench);
criterion_main!(benches);

const URL: &str = "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8";

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("byteark");

    let signer = Signer::new(
        "2Aj6Wkge4hi1ZYLp0DBG",
        "31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7",
    )
    .expect("signer must be valid");
    let options = SignOptions::new()
        .with_path_prefix("/video-objects/QDuxJm02TYqJ/")
        .with_client_ip("103.253.132.65");

    group.bench_function("sign", |b| {
        b.iter(|| signer.sign(URL, 0, &options).expect("must success"))
    });

    let signed = signer.sign(URL, 0, &options).expect("must success");
    let request = VerifyOptions::new().with_client_ip("103.253.132.65");
    group.bench_function("verify", |b| {
        b.iter(|| signer.verify(&signed, &request).expect("must success"))
    });

    group.finish();
}
